use cambatch::SceneDoc;

#[test]
fn json_fixture_validates() {
    let s = include_str!("data/scene_doc.json");
    let doc: SceneDoc = serde_json::from_str(s).unwrap();
    doc.validate().unwrap();
    assert_eq!(doc.cameras.len(), 3);
    assert!(!doc.persistent_data);
    assert!(!doc.use_file_extension);
}
