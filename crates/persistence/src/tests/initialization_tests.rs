// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::create_test_seller;
use crate::{PersistenceError, SqlitePersistence};

#[test]
fn test_persistence_initialization() {
    let result: Result<SqlitePersistence, PersistenceError> = SqlitePersistence::new_in_memory();
    assert!(result.is_ok());
}

#[test]
fn test_foreign_keys_are_enforced() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();
    assert!(persistence.verify_foreign_key_enforcement().is_ok());
}

#[test]
fn test_multiple_in_memory_instances_are_isolated() {
    let mut db1 = SqlitePersistence::new_in_memory().unwrap();
    let mut db2 = SqlitePersistence::new_in_memory().unwrap();

    let seller_id = create_test_seller(&mut db1);

    assert!(db1.get_seller(seller_id).unwrap().is_some());
    assert!(db2.get_seller(seller_id).unwrap().is_none());
}

#[test]
fn test_file_database_survives_reopen() {
    let path = std::env::temp_dir().join(format!(
        "slotbook_persistence_test_{}.db",
        std::process::id()
    ));
    let _ = std::fs::remove_file(&path);

    let seller_id = {
        let mut persistence = SqlitePersistence::new_with_file(&path).unwrap();
        create_test_seller(&mut persistence)
    };

    let mut reopened = SqlitePersistence::new_with_file(&path).unwrap();
    let seller = reopened.get_seller(seller_id).unwrap().unwrap();
    assert_eq!(seller.name, "Ayse Yilmaz");

    drop(reopened);
    let _ = std::fs::remove_file(&path);
    let _ = std::fs::remove_file(path.with_extension("db-wal"));
    let _ = std::fs::remove_file(path.with_extension("db-shm"));
}
