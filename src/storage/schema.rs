//! Database schema definitions

/// Files seen by the pipeline, whatever the import outcome
pub const CREATE_HANDLED_FILES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS handled_files (
    filename TEXT NOT NULL,
    origin TEXT NOT NULL,
    import_date TEXT NOT NULL,
    PRIMARY KEY (filename, origin)
)
"#;

/// Files successfully imported into the assembled model
pub const CREATE_IMPORTED_FILES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS imported_files (
    filename TEXT NOT NULL,
    origin TEXT NOT NULL,
    import_date TEXT NOT NULL,
    PRIMARY KEY (filename, origin)
)
"#;

pub const CREATE_FILENAME_BY_UUID_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS filename_by_uuid (
    uuid TEXT NOT NULL,
    origin TEXT NOT NULL,
    filename TEXT NOT NULL,
    PRIMARY KEY (uuid, origin)
)
"#;

pub const CREATE_UUID_BY_FILENAME_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS uuid_by_filename (
    filename TEXT NOT NULL,
    origin TEXT NOT NULL,
    uuid TEXT NOT NULL,
    PRIMARY KEY (filename, origin)
)
"#;

/// SQL to create the dependencies table
/// The list column holds a JSON array of uuids, kept in caller order
pub const CREATE_DEPENDENCIES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS dependencies (
    uuid TEXT PRIMARY KEY,
    dependencies TEXT NOT NULL
)
"#;

pub const INSERT_HANDLED_FILE: &str =
    "INSERT OR REPLACE INTO handled_files (filename, origin, import_date) VALUES (?1, ?2, ?3)";

pub const INSERT_IMPORTED_FILE: &str =
    "INSERT OR REPLACE INTO imported_files (filename, origin, import_date) VALUES (?1, ?2, ?3)";

pub const INSERT_FILENAME_BY_UUID: &str =
    "INSERT OR REPLACE INTO filename_by_uuid (uuid, filename, origin) VALUES (?1, ?2, ?3)";

pub const INSERT_UUID_BY_FILENAME: &str =
    "INSERT OR REPLACE INTO uuid_by_filename (filename, uuid, origin) VALUES (?1, ?2, ?3)";

pub const INSERT_DEPENDENCIES: &str =
    "INSERT OR REPLACE INTO dependencies (uuid, dependencies) VALUES (?1, ?2)";

/// All schema creation statements
pub fn all_schema_statements() -> Vec<&'static str> {
    vec![
        CREATE_HANDLED_FILES_TABLE,
        CREATE_IMPORTED_FILES_TABLE,
        CREATE_FILENAME_BY_UUID_TABLE,
        CREATE_UUID_BY_FILENAME_TABLE,
        CREATE_DEPENDENCIES_TABLE,
    ]
}

/// Write statements compiled once when the store connects
pub fn all_write_statements() -> [&'static str; 5] {
    [
        INSERT_HANDLED_FILE,
        INSERT_FILENAME_BY_UUID,
        INSERT_UUID_BY_FILENAME,
        INSERT_IMPORTED_FILE,
        INSERT_DEPENDENCIES,
    ]
}
