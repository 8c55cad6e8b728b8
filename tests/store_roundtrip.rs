use jt::model::TagDb;
use jt::store::fs::FileStore;
use jt::store::DataStore;
use jt::tag::{AcKey, DirKey, ExtKey, IdKey, TagKey};

#[test]
fn mutations_survive_a_reload() {
    let temp = tempfile::tempdir().unwrap();
    let path = temp.path().join("nested").join("jt.json");
    let mut store = FileStore::new(&path);

    let mut db = store.load().unwrap();
    assert!(db.is_empty());

    db.add_category(&AcKey::parse("31").unwrap(), "Finance").unwrap();
    let id = IdKey::parse("31.11").unwrap();
    db.add_id(&id, "Taxes").unwrap();
    let dir = DirKey::from_number(12).unwrap();
    let ext = db.create_linked_extension(&id, "2024", &dir).unwrap();
    assert_eq!(ext, ExtKey::parse("31.11+0001").unwrap());
    db.name_directory(&dir, "Receipts");
    store.save(&db).unwrap();

    let reloaded = FileStore::new(&path).load().unwrap();
    assert_eq!(reloaded, db);
    assert!(reloaded.edge_violations().is_empty());
    assert_eq!(reloaded.dir_name(dir.as_str()), "Receipts");
}

#[test]
fn a_move_is_persisted_consistently() {
    let temp = tempfile::tempdir().unwrap();
    let mut store = FileStore::new(temp.path().join("jt.json"));

    let mut db = TagDb::new();
    db.add_category(&AcKey::parse("01").unwrap(), "Admin").unwrap();
    let id = IdKey::parse("01.01").unwrap();
    db.add_id(&id, "General").unwrap();
    let dir = DirKey::from_number(1).unwrap();
    db.create_linked_extension(&id, "Note", &dir).unwrap();
    store.save(&db).unwrap();

    let mut db = store.load().unwrap();
    let from: TagKey = "01".parse().unwrap();
    let to: TagKey = "02".parse().unwrap();
    db.move_tag(&from, &to).unwrap();
    store.save(&db).unwrap();

    let db = store.load().unwrap();
    assert!(db.ext.contains_key("02.01+0001"));
    assert_eq!(db.dir[dir.as_str()].ext, vec!["02.01+0001".to_string()]);
    assert!(db.edge_violations().is_empty());
}
