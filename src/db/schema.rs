//! Desired schema for the notes store, expressed as data.
//! SQLite-first; reconciliation only ever adds nullable columns.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSpec {
    pub name: &'static str,
    /// Column type and constraints as they appear after the name in DDL.
    pub decl: &'static str,
}

#[derive(Debug, Clone, Copy)]
pub struct TableSpec {
    pub name: &'static str,
    pub columns: &'static [ColumnSpec],
}

/// `notes` table:
/// - `id` INTEGER PRIMARY KEY AUTOINCREMENT (ids are never reused)
/// - `image_data` nullable; added to stores created before it existed
/// - timestamps stored as ISO-8601 text without timezone suffix
pub const NOTES_TABLE: TableSpec = TableSpec {
    name: "notes",
    columns: &[
        ColumnSpec {
            name: "id",
            decl: "INTEGER PRIMARY KEY AUTOINCREMENT",
        },
        ColumnSpec {
            name: "title",
            decl: "TEXT NOT NULL",
        },
        ColumnSpec {
            name: "content",
            decl: "TEXT NOT NULL",
        },
        ColumnSpec {
            name: "image_data",
            decl: "TEXT",
        },
        ColumnSpec {
            name: "created_at",
            decl: "TEXT NOT NULL",
        },
        ColumnSpec {
            name: "updated_at",
            decl: "TEXT NOT NULL",
        },
    ],
};

impl TableSpec {
    pub fn create_sql(&self) -> String {
        let cols = self
            .columns
            .iter()
            .map(|c| format!("    {} {}", c.name, c.decl))
            .collect::<Vec<_>>()
            .join(",\n");
        format!("CREATE TABLE IF NOT EXISTS {} (\n{}\n)", self.name, cols)
    }

    /// Columns of this spec that are absent from `existing`, in declaration order.
    pub fn missing_columns<'a, I>(&self, existing: I) -> Vec<ColumnSpec>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let existing: Vec<&str> = existing.into_iter().collect();
        self.columns
            .iter()
            .filter(|c| !existing.iter().any(|e| e.eq_ignore_ascii_case(c.name)))
            .copied()
            .collect()
    }
}

impl ColumnSpec {
    /// Only columns that accept NULL can be added to an existing table.
    pub fn is_nullable(&self) -> bool {
        let decl = self.decl.to_ascii_uppercase();
        !decl.contains("NOT NULL") && !decl.contains("PRIMARY KEY")
    }

    pub fn add_column_sql(&self, table: &str) -> String {
        format!("ALTER TABLE {} ADD COLUMN {} {}", table, self.name, self.decl)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_sql_lists_every_column() {
        let sql = NOTES_TABLE.create_sql();
        assert!(sql.starts_with("CREATE TABLE IF NOT EXISTS notes ("));
        for col in NOTES_TABLE.columns {
            assert!(sql.contains(&format!("{} {}", col.name, col.decl)));
        }
    }

    #[test]
    fn missing_columns_detects_legacy_schema() {
        let legacy = ["id", "title", "content", "created_at", "updated_at"];
        let missing = NOTES_TABLE.missing_columns(legacy);
        assert_eq!(missing.len(), 1);
        assert_eq!(missing[0].name, "image_data");
        assert!(missing[0].is_nullable());
        assert_eq!(
            missing[0].add_column_sql(NOTES_TABLE.name),
            "ALTER TABLE notes ADD COLUMN image_data TEXT"
        );
    }

    #[test]
    fn nullability_follows_declaration() {
        let nullable: Vec<&str> = NOTES_TABLE
            .columns
            .iter()
            .filter(|c| c.is_nullable())
            .map(|c| c.name)
            .collect();
        assert_eq!(nullable, vec!["image_data"]);
    }

    #[test]
    fn nothing_missing_for_current_schema() {
        let names: Vec<&str> = NOTES_TABLE.columns.iter().map(|c| c.name).collect();
        assert!(NOTES_TABLE.missing_columns(names).is_empty());
    }
}
