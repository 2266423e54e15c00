#![allow(dead_code)]

use std::path::{Path, PathBuf};

use rusqlite::{params, Connection};

pub struct Page<'a> {
    pub id: i64,
    pub title: &'a str,
    pub is_redirect: bool,
    /// `(outgoing, incoming)`; `None` means no links row.
    pub links: Option<(i64, i64)>,
}

pub fn page(id: i64, title: &str, links: Option<(i64, i64)>) -> Page<'_> {
    Page {
        id,
        title,
        is_redirect: false,
        links,
    }
}

pub fn redirect(id: i64, title: &str) -> Page<'_> {
    Page {
        id,
        title,
        is_redirect: true,
        links: None,
    }
}

/// Builds a snapshot file with the pages/links/redirects schema.
pub fn build_snapshot(dir: &Path, pages: &[Page<'_>], redirects: usize) -> PathBuf {
    let path = dir.join("snapshot.sqlite");
    let conn = Connection::open(&path).unwrap();
    conn.execute_batch(
        "CREATE TABLE pages (
             id          INTEGER PRIMARY KEY,
             title       TEXT NOT NULL,
             is_redirect INT NOT NULL
         );
         CREATE TABLE links (
             id                   INTEGER PRIMARY KEY,
             outgoing_links_count INTEGER,
             incoming_links_count INTEGER,
             outgoing_links       TEXT,
             incoming_links       TEXT
         );
         CREATE TABLE redirects (
             source_id INTEGER PRIMARY KEY,
             target_id INTEGER
         );",
    )
    .unwrap();

    let tx = conn.unchecked_transaction().unwrap();
    {
        let mut p_stmt = tx
            .prepare("INSERT INTO pages (id, title, is_redirect) VALUES (?1, ?2, ?3)")
            .unwrap();
        let mut l_stmt = tx
            .prepare(
                "INSERT INTO links (id, outgoing_links_count, incoming_links_count)
                 VALUES (?1, ?2, ?3)",
            )
            .unwrap();
        for p in pages {
            p_stmt.execute(params![p.id, p.title, p.is_redirect as i64]).unwrap();
            if let Some((out, inc)) = p.links {
                l_stmt.execute(params![p.id, out, inc]).unwrap();
            }
        }
        let mut r_stmt = tx
            .prepare("INSERT INTO redirects (source_id, target_id) VALUES (?1, ?2)")
            .unwrap();
        for i in 0..redirects {
            r_stmt.execute(params![1_000_000 + i as i64, 1]).unwrap();
        }
    }
    tx.commit().unwrap();
    path
}

/// A small but complete snapshot exercising every fact.
pub fn sample_pages() -> Vec<Page<'static>> {
    vec![
        page(1, "Earth", Some((120, 900))),
        page(2, "List_of_lists_of_lists", Some((4000, 10))),
        page(3, "Zürich", Some((35, 80))),
        page(4, "!Hero", Some((2, 0))),
        page(5, "Why?", Some((0, 3))),
        page(6, "Rock_\\'n\\'_Roll", Some((7, 7))),
        page(7, "A", None),
        page(8, "B", None),
        page(9, "Pneumonoultramicroscopicsilicovolcanoconiosis", Some((1, 1))),
        page(10, "Floccinaucinihilipilification", Some((0, 0))),
        redirect(11, "Planet_Earth"),
    ]
}
