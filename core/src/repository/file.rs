use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::{Result, StoreError};
use crate::model::task::Task;
use crate::repository::traits::TaskRepository;

const DEFAULT_FILE_NAME: &str = "tasks.json";

/// JSON-file repository. The base directory is injectable so tests (and
/// alternative front ends) can each point at their own file; when none is
/// given the file lives in `~/.taskbook/tasks.json`.
#[derive(Clone)]
pub struct FileTaskRepository {
    file_path: PathBuf,
}

impl FileTaskRepository {
    pub fn new(base_dir: Option<PathBuf>) -> Result<Self> {
        let mut path = match base_dir {
            Some(dir) => dir,
            None => {
                let home_dir = dirs::home_dir().ok_or(StoreError::NoHomeDir)?;
                home_dir.join(".taskbook")
            }
        };
        fs::create_dir_all(&path)?;
        path.push(DEFAULT_FILE_NAME);

        Ok(FileTaskRepository { file_path: path })
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }
}

impl TaskRepository for FileTaskRepository {
    /// A missing file is an empty collection, not an error. A present but
    /// malformed file is an error; it is never silently discarded.
    fn load(&self) -> Result<Vec<Task>> {
        if !self.file_path.exists() {
            return Ok(Vec::new());
        }
        let file = File::open(&self.file_path)?;
        let reader = BufReader::new(file);
        let tasks = serde_json::from_reader(reader)?;
        Ok(tasks)
    }

    fn save(&self, tasks: &[Task]) -> Result<()> {
        let file = File::create(&self.file_path)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, tasks)?;
        writer.flush()?;
        Ok(())
    }
}
