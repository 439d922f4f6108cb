// Example: Basic usage of the duenotes-core library
use std::fs;

use chrono::{Duration, Local};
use duenotes_core::session::from_fields;
use duenotes_core::{remaining_for, EditSession, NoteStore};

fn main() -> anyhow::Result<()> {
    let store_path = "basic_usage_notes.json";
    fs::remove_file(store_path).ok(); // Clean up previous run

    println!("--- Basic Usage of duenotes-core ---");

    // ========== Open Store ==========
    println!("\n1. Opening store...");
    let mut store = NoteStore::open(store_path)?;
    println!("   ✓ Store opened with {} notes", store.len());

    // ========== Create Notes ==========
    println!("\n2. Creating notes...");
    let now = Local::now().naive_local();
    let in_a_day = now + Duration::days(1) + Duration::seconds(3661);
    let report = from_fields(
        "Quarterly report".to_string(),
        "Collect numbers from finance".to_string(),
        &in_a_day.format("%Y-%m-%d %H:%M:%S").to_string(),
    )?;
    store.add(report)?;

    let mut session = EditSession::create(now - Duration::minutes(5));
    session.fields.title = "Renew passport".to_string();
    if let Some(note) = session.resolve(session.accept())? {
        store.add(note)?;
    }
    println!("   ✓ Created {} notes", store.len());

    // ========== Countdowns ==========
    println!("\n3. Countdowns...");
    for note in store.list() {
        match remaining_for(note, now) {
            Ok(left) if left.is_overdue() => println!("   ! {} (overdue, remaining: {})", note.title, left),
            Ok(left) => println!("   • {} (remaining: {})", note.title, left),
            Err(err) => println!("   ? {} ({})", note.title, err),
        }
    }

    // ========== Edit and Delete ==========
    println!("\n4. Editing and deleting...");
    let mut session = EditSession::edit(&store.list()[0]);
    session.fields.content.push_str(" and marketing");
    if let Some(note) = session.resolve(session.accept())? {
        let index = store.position_of(&note.id).unwrap_or(0);
        store.update_at(index, note)?;
    }
    let removed = store.delete_at(1)?;
    println!("   ✓ Deleted '{}'", removed.title);

    // ========== Reload ==========
    println!("\n5. Reloading from disk...");
    let reloaded = NoteStore::open(store_path)?;
    for note in reloaded.list() {
        println!("   • {}: {}", note.title, note.content);
    }

    fs::remove_file(store_path).ok();
    println!("\n✓ Done");
    Ok(())
}
