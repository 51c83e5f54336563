//! Dual-mode resource resolution: a loose directory tree and a zip archive
//! with the same layout must be indistinguishable through the provider.

use std::fs;
use std::io::Write;
use std::path::PathBuf;

use tempfile::TempDir;

use couch_harness::design;
use couch_harness::error::CouchError;
use couch_harness::resources::{BundledResourceProvider, ResourceProvider, LINE_SEP};

const MAP_FN: &str = "function(doc) { emit(doc._id, null); }";
const REDUCE_FN: &str = "_count";

/// `docs/{a.js, b.js, sub/c.js, sub/d/e.js}` plus a loose `notes.txt`.
fn directory_fixture() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let docs = tmp.path().join("docs");
    fs::create_dir_all(docs.join("sub").join("d")).unwrap();
    fs::write(docs.join("a.js"), "emit(1);\n").unwrap();
    fs::write(docs.join("b.js"), "emit(2);\n").unwrap();
    fs::write(docs.join("sub").join("c.js"), "emit(3);\n").unwrap();
    fs::write(docs.join("sub").join("d").join("e.js"), "emit(4);\n").unwrap();
    fs::write(tmp.path().join("notes.txt"), "line1\nline2").unwrap();
    tmp
}

/// The same layout packaged as a zip archive, plus entries outside the
/// `docs/` prefix that enumeration must ignore.
fn archive_fixture() -> (TempDir, PathBuf) {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("bundle.zip");
    let file = fs::File::create(&path).unwrap();
    let mut zip = zip::ZipWriter::new(file);

    for (name, content) in [
        ("docs/a.js", "emit(1);\n"),
        ("docs/b.js", "emit(2);\n"),
        ("docs/sub/c.js", "emit(3);\n"),
        ("docs/sub/d/e.js", "emit(4);\n"),
        ("notes.txt", "line1\nline2"),
        ("unrelated/readme.md", "ignore me\n"),
    ] {
        zip.start_file(name, zip::write::SimpleFileOptions::default())
            .unwrap();
        zip.write_all(content.as_bytes()).unwrap();
    }
    zip.finish().unwrap();
    (tmp, path)
}

#[test]
fn list_collapses_depth_and_dedups_in_directory_mode() {
    let tmp = directory_fixture();
    let provider = BundledResourceProvider::new(tmp.path());

    let entries = provider.list_resources("docs/").unwrap();
    assert_eq!(entries, vec!["a.js", "b.js", "sub"]);
}

#[test]
fn list_collapses_depth_and_dedups_in_archive_mode() {
    let (_tmp, archive) = archive_fixture();
    let provider = BundledResourceProvider::new(&archive);

    // Nested entries under sub/ collapse into one segment; entries outside
    // the prefix are filtered out.
    let entries = provider.list_resources("docs/").unwrap();
    assert_eq!(entries, vec!["a.js", "b.js", "sub"]);
}

#[test]
fn both_modes_agree_on_identical_layouts() {
    let tmp = directory_fixture();
    let (_ztmp, archive) = archive_fixture();
    let dir_provider = BundledResourceProvider::new(tmp.path());
    let zip_provider = BundledResourceProvider::new(&archive);

    assert_eq!(
        dir_provider.list_resources("docs/").unwrap(),
        zip_provider.list_resources("docs/").unwrap()
    );
    assert_eq!(
        dir_provider.list_resources("docs/sub/").unwrap(),
        zip_provider.list_resources("docs/sub/").unwrap()
    );
}

#[test]
fn unresolvable_paths_list_as_empty_not_error() {
    let tmp = directory_fixture();
    let (_ztmp, archive) = archive_fixture();

    let dir_provider = BundledResourceProvider::new(tmp.path());
    assert!(dir_provider.list_resources("missing/").unwrap().is_empty());

    let zip_provider = BundledResourceProvider::new(&archive);
    assert!(zip_provider.list_resources("missing/").unwrap().is_empty());

    // An anchor that exists as neither directory nor file resolves to
    // nothing at all.
    let gone = BundledResourceProvider::new(tmp.path().join("nope"));
    assert!(gone.list_resources("docs/").unwrap().is_empty());
}

#[test]
fn read_appends_platform_terminator_to_last_line() {
    let tmp = directory_fixture();
    let provider = BundledResourceProvider::new(tmp.path());

    // "line1\nline2" has no trailing newline; the read gains one.
    let expected = format!("line1{}line2{}", LINE_SEP, LINE_SEP);
    assert_eq!(provider.read_file("notes.txt").unwrap(), expected);

    let (_ztmp, archive) = archive_fixture();
    let provider = BundledResourceProvider::new(&archive);
    assert_eq!(provider.read_file("notes.txt").unwrap(), expected);
}

#[test]
fn read_of_missing_resource_is_a_clean_error() {
    let tmp = directory_fixture();
    let provider = BundledResourceProvider::new(tmp.path());
    let err = provider.read_file("docs/zzz.js").unwrap_err();
    assert!(matches!(err, CouchError::ResourceNotFound(_)));

    let (_ztmp, archive) = archive_fixture();
    let provider = BundledResourceProvider::new(&archive);
    let err = provider.read_file("docs/zzz.js").unwrap_err();
    assert!(matches!(err, CouchError::ResourceNotFound(_)));

    let gone = BundledResourceProvider::new(tmp.path().join("nope"));
    let err = gone.read_file("docs/a.js").unwrap_err();
    assert!(matches!(err, CouchError::ResourceNotFound(_)));
}

// ─── design documents ────────────────────────────────────────────────────

/// `design-docs/example` with a map+reduce view, a map-only view, and a
/// broken view (reduce without map) that assembly must skip.
fn design_directory_fixture() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let views = tmp.path().join("design-docs").join("example").join("views");
    fs::create_dir_all(views.join("by_tag")).unwrap();
    fs::create_dir_all(views.join("all")).unwrap();
    fs::create_dir_all(views.join("broken")).unwrap();
    fs::write(views.join("by_tag").join("map.js"), MAP_FN).unwrap();
    fs::write(views.join("by_tag").join("reduce.js"), REDUCE_FN).unwrap();
    fs::write(views.join("all").join("map.js"), MAP_FN).unwrap();
    fs::write(views.join("broken").join("reduce.js"), REDUCE_FN).unwrap();
    tmp
}

fn design_archive_fixture() -> (TempDir, PathBuf) {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("bundle.zip");
    let file = fs::File::create(&path).unwrap();
    let mut zip = zip::ZipWriter::new(file);

    for (name, content) in [
        ("design-docs/example/views/by_tag/map.js", MAP_FN),
        ("design-docs/example/views/by_tag/reduce.js", REDUCE_FN),
        ("design-docs/example/views/all/map.js", MAP_FN),
        ("design-docs/example/views/broken/reduce.js", REDUCE_FN),
    ] {
        zip.start_file(name, zip::write::SimpleFileOptions::default())
            .unwrap();
        zip.write_all(content.as_bytes()).unwrap();
    }
    zip.finish().unwrap();
    (tmp, path)
}

#[test]
fn design_document_assembles_from_directory() {
    let tmp = design_directory_fixture();
    let provider = BundledResourceProvider::new(tmp.path());

    let doc = design::from_disk(&provider, "example").unwrap();
    assert_eq!(doc.id, "_design/example");
    assert_eq!(doc.language, "javascript");
    assert_eq!(
        doc.views.keys().map(String::as_str).collect::<Vec<_>>(),
        vec!["all", "by_tag"]
    );
    assert!(doc.views["by_tag"].reduce.is_some());
    assert!(doc.views["all"].reduce.is_none());
    assert!(doc.views["by_tag"].map.starts_with("function(doc)"));
}

#[test]
fn design_document_is_identical_across_backings() {
    let tmp = design_directory_fixture();
    let (_ztmp, archive) = design_archive_fixture();

    let from_dir =
        design::from_disk(&BundledResourceProvider::new(tmp.path()), "example").unwrap();
    let from_zip =
        design::from_disk(&BundledResourceProvider::new(&archive), "example").unwrap();
    assert_eq!(from_dir, from_zip);
}

#[test]
fn design_document_serializes_with_couch_id_field() {
    let tmp = design_directory_fixture();
    let provider = BundledResourceProvider::new(tmp.path());

    let doc = design::from_disk(&provider, "example").unwrap();
    let json = serde_json::to_value(&doc).unwrap();
    assert_eq!(json["_id"], "_design/example");
    assert!(json["views"]["by_tag"]["map"].is_string());
}

#[test]
fn unknown_design_document_yields_empty_view_set() {
    let tmp = design_directory_fixture();
    let provider = BundledResourceProvider::new(tmp.path());

    let doc = design::from_disk(&provider, "absent").unwrap();
    assert!(doc.views.is_empty());
}
