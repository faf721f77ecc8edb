//! Label database queries.
//!
//! Lookup, creation and thread association for labels.

use rusqlite::{params, Connection, OptionalExtension, Result, Row};

use crate::domain::{Label, LabelId, ThreadId};

fn row_to_label(row: &Row<'_>) -> Result<Label> {
    Ok(Label {
        id: LabelId::from(row.get::<_, String>(0)?),
        name: row.get(1)?,
    })
}

/// Inserts a new label.
pub fn insert(conn: &Connection, label: &Label) -> Result<()> {
    conn.execute(
        "INSERT INTO labels (id, name, created_at) VALUES (?1, ?2, datetime('now'))",
        params![label.id.0.as_str(), label.name],
    )?;
    Ok(())
}

/// Gets a label by its exact name.
pub fn get_by_name(conn: &Connection, name: &str) -> Result<Option<Label>> {
    conn.query_row(
        "SELECT id, name FROM labels WHERE name = ?1",
        params![name],
        row_to_label,
    )
    .optional()
}

/// Gets all labels, ordered by name.
pub fn get_all(conn: &Connection) -> Result<Vec<Label>> {
    let mut stmt = conn.prepare("SELECT id, name FROM labels ORDER BY name")?;
    let labels = stmt.query_map([], row_to_label)?;
    labels.collect()
}

/// Gets the labels applied to a thread, in the order they were applied.
pub fn get_for_thread(conn: &Connection, thread_id: &ThreadId) -> Result<Vec<Label>> {
    let mut stmt = conn.prepare(
        "SELECT l.id, l.name
         FROM thread_labels tl JOIN labels l ON l.id = tl.label_id
         WHERE tl.thread_id = ?1
         ORDER BY tl.rowid",
    )?;
    let labels = stmt.query_map(params![thread_id.0.as_str()], row_to_label)?;
    labels.collect()
}

/// Applies a label to a thread. Applying it twice is a no-op.
pub fn apply_to_thread(conn: &Connection, label_id: &LabelId, thread_id: &ThreadId) -> Result<()> {
    conn.execute(
        "INSERT OR IGNORE INTO thread_labels (thread_id, label_id, applied_at)
         VALUES (?1, ?2, datetime('now'))",
        params![thread_id.0.as_str(), label_id.0.as_str()],
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::queries::threads;

    fn setup() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        for migration in crate::storage::schema::all_migrations() {
            conn.execute_batch(migration).unwrap();
        }
        conn
    }

    #[test]
    fn insert_and_get_by_name() {
        let conn = setup();
        let label = Label::new("label-1", "Abc/Def");

        insert(&conn, &label).unwrap();
        let fetched = get_by_name(&conn, "Abc/Def").unwrap().unwrap();

        assert_eq!(fetched.id, label.id);
        assert!(get_by_name(&conn, "abc/def").unwrap().is_none());
    }

    #[test]
    fn get_all_sorted() {
        let conn = setup();
        insert(&conn, &Label::new("l1", "Zebra")).unwrap();
        insert(&conn, &Label::new("l2", "Alpha")).unwrap();

        let names: Vec<String> = get_all(&conn).unwrap().into_iter().map(|l| l.name).collect();
        assert_eq!(names, vec!["Alpha", "Zebra"]);
    }

    #[test]
    fn apply_and_list_thread_labels() {
        let conn = setup();
        let thread = ThreadId::from("t1");
        threads::insert(&conn, &thread, &[]).unwrap();
        insert(&conn, &Label::new("l1", "Work")).unwrap();
        insert(&conn, &Label::new("l2", "Alpha")).unwrap();

        apply_to_thread(&conn, &LabelId::from("l1"), &thread).unwrap();
        apply_to_thread(&conn, &LabelId::from("l2"), &thread).unwrap();
        apply_to_thread(&conn, &LabelId::from("l1"), &thread).unwrap();

        let names: Vec<String> = get_for_thread(&conn, &thread)
            .unwrap()
            .into_iter()
            .map(|l| l.name)
            .collect();
        assert_eq!(names, vec!["Work", "Alpha"]);
    }
}
