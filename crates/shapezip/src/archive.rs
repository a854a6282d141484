//! Packages a job's shapefile set into a single compressed archive.

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::error::ArchiveError;
use crate::export::{shapefile_members, SHAPEFILE_EXTENSIONS};

pub struct ArchiveBuilder {
    working_directory: PathBuf,
}

impl ArchiveBuilder {
    pub fn new<P: AsRef<Path>>(working_directory: P) -> Self {
        Self {
            working_directory: working_directory.as_ref().to_path_buf(),
        }
    }

    pub fn working_directory(&self) -> &Path {
        &self.working_directory
    }

    /// Builds `<name>.zip` in the working directory from the four expected
    /// sibling files. Entries are stored under their base file names only.
    /// Re-running with the same name replaces the previous archive.
    pub fn build(&self, name: &str) -> Result<PathBuf, ArchiveError> {
        let members = shapefile_members(&self.working_directory, name);

        // Validate the full member set before touching any existing archive.
        // A run that is going to fail must not truncate a prior deliverable.
        for member in &members {
            let metadata = std::fs::metadata(member)
                .map_err(|_| ArchiveError::MissingMember(member.clone()))?;
            if metadata.len() == 0 {
                return Err(ArchiveError::EmptyMember(member.clone()));
            }
        }

        let archive_path = self.working_directory.join(format!("{}.zip", name));
        let file = File::create(&archive_path).map_err(|e| ArchiveError::CreateArchive {
            path: archive_path.clone(),
            source: e,
        })?;

        let mut writer = ZipWriter::new(file);
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

        for (member, ext) in members.iter().zip(SHAPEFILE_EXTENSIONS) {
            let entry_name = format!("{}.{}", name, ext);
            writer
                .start_file(entry_name.as_str(), options)
                .map_err(|e| ArchiveError::WriteEntry {
                    name: entry_name.clone(),
                    source: e,
                })?;

            let mut source = File::open(member).map_err(|e| ArchiveError::ReadMember {
                path: member.clone(),
                source: e,
            })?;
            io::copy(&mut source, &mut writer).map_err(|e| ArchiveError::ReadMember {
                path: member.clone(),
                source: e,
            })?;
        }

        writer.finish().map_err(|e| ArchiveError::FinishArchive {
            path: archive_path.clone(),
            source: e,
        })?;

        debug!(
            "Packaged {} members into {}",
            members.len(),
            archive_path.display()
        );

        Ok(archive_path)
    }
}
