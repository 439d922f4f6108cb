use crate::models::Note;
use crate::{Error, Result};
use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// The authoritative, ordered collection of notes, backed by one JSON file.
///
/// Position in the collection is display order. Every mutation rewrites the
/// whole file before returning; if that write fails the mutation is undone.
#[derive(Debug)]
pub struct NoteStore {
    path: PathBuf,
    notes: Vec<Note>,
}

impl NoteStore {
    /// Create an empty store bound to `path`. Nothing is read yet.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            notes: Vec::new(),
        }
    }

    /// Create a store and load it from disk
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut store = Self::new(path);
        store.load()?;
        Ok(store)
    }

    /// Replace the in-memory collection with the file's contents.
    ///
    /// A missing file yields an empty collection. A file that is not a JSON
    /// array of notes is reported as [`Error::CorruptStore`] and the current
    /// collection is kept.
    pub fn load(&mut self) -> Result<()> {
        let data = match fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "note store not found, starting empty");
                self.notes.clear();
                return Ok(());
            }
            Err(err) => return Err(err.into()),
        };

        let notes: Vec<Note> = serde_json::from_str(&data).map_err(|source| Error::CorruptStore {
            path: self.path.clone(),
            source,
        })?;

        info!(path = %self.path.display(), count = notes.len(), "loaded notes");
        self.notes = notes;
        Ok(())
    }

    /// Write the whole collection to disk.
    ///
    /// The data goes to a sibling temp file which is synced and then renamed
    /// over the target, so a reader never sees a half-written file.
    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let json = serde_json::to_vec_pretty(&self.notes)?;
        let tmp_path = self.temp_path();

        let write = || -> std::io::Result<()> {
            let mut file = File::create(&tmp_path)?;
            file.write_all(&json)?;
            file.sync_all()?;
            fs::rename(&tmp_path, &self.path)
        };

        if let Err(err) = write() {
            let _ = fs::remove_file(&tmp_path);
            return Err(err.into());
        }

        debug!(path = %self.path.display(), count = self.notes.len(), "saved notes");
        Ok(())
    }

    /// All notes in display order
    pub fn list(&self) -> &[Note] {
        &self.notes
    }

    pub fn get(&self, index: usize) -> Option<&Note> {
        self.notes.get(index)
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Current position of the note with the given id
    pub fn position_of(&self, id: &str) -> Option<usize> {
        self.notes.iter().position(|n| n.id == id)
    }

    /// Append a note and persist
    pub fn add(&mut self, note: Note) -> Result<()> {
        self.notes.push(note);

        if let Err(err) = self.save() {
            self.notes.pop();
            return Err(err);
        }

        debug!(index = self.notes.len() - 1, len = self.notes.len(), "added note");
        Ok(())
    }

    /// Replace the note at `index` and persist
    pub fn update_at(&mut self, index: usize, note: Note) -> Result<()> {
        self.check_index(index)?;
        let previous = std::mem::replace(&mut self.notes[index], note);

        if let Err(err) = self.save() {
            self.notes[index] = previous;
            return Err(err);
        }

        debug!(index, len = self.notes.len(), "updated note");
        Ok(())
    }

    /// Remove the note at `index`, persist, and return it
    pub fn delete_at(&mut self, index: usize) -> Result<Note> {
        self.check_index(index)?;
        let removed = self.notes.remove(index);

        if let Err(err) = self.save() {
            self.notes.insert(index, removed);
            return Err(err);
        }

        debug!(index, len = self.notes.len(), "deleted note");
        Ok(removed)
    }

    /// Check if the persistence file exists
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Get the persistence file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index >= self.notes.len() {
            return Err(Error::IndexOutOfRange {
                index,
                len: self.notes.len(),
            });
        }
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "notes.json".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}
