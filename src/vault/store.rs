//! High-level vault operations used by CLI commands.
//!
//! `VaultManager` owns the data directory and the three files inside it:
//!
//! ```text
//! <data_dir>/auth.hash        SHA-256 hex of the master password
//! <data_dir>/data.encrypted   {"salt": .., "ciphertext": ..} blob
//! <data_dir>/settings.json    plaintext settings
//! ```
//!
//! Every `save` re-encrypts the whole dataset under a fresh salt and
//! replaces the blob via temp-file + rename.  The manager holds no
//! password and no decrypted data between calls.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::config::Settings;
use crate::crypto::{hash_password, verify_password_hash, CipherEngine};
use crate::errors::{Result, VaultError};

use super::dataset::Dataset;

/// File holding the master-password verification hash.
pub const HASH_FILE: &str = "auth.hash";

/// File holding the encrypted dataset.
pub const DATA_FILE: &str = "data.encrypted";

/// File holding plaintext settings.
pub const SETTINGS_FILE: &str = "settings.json";

/// Owner of the on-disk vault layout.
#[derive(Debug, Clone)]
pub struct VaultManager {
    dir: PathBuf,
    engine: CipherEngine,
}

impl VaultManager {
    /// Create a manager rooted at `dir`.  Nothing is touched on disk.
    pub fn new(dir: impl Into<PathBuf>, engine: CipherEngine) -> Self {
        Self {
            dir: dir.into(),
            engine,
        }
    }

    // ------------------------------------------------------------------
    // Master password
    // ------------------------------------------------------------------

    /// Returns `true` once a master password has been set.
    ///
    /// Pure existence check. Nothing is read or decrypted.
    pub fn has_master_password(&self) -> bool {
        self.hash_path().exists()
    }

    /// Write the verification hash for `password`.
    ///
    /// Creates the data directory if needed.  Calling this on an
    /// existing vault overwrites the hash but leaves the blob encrypted
    /// under whatever password last saved it.
    pub fn set_master_password(&self, password: &str) -> Result<()> {
        self.ensure_dir()?;
        write_atomic(&self.hash_path(), hash_password(password).as_bytes())?;
        tracing::info!(dir = %self.dir.display(), "master password set");
        Ok(())
    }

    /// Check `password` against the stored verification hash.
    ///
    /// Returns `false` when no hash exists or it cannot be read.
    pub fn verify_master_password(&self, password: &str) -> bool {
        let path = self.hash_path();
        if !path.exists() {
            return false;
        }
        match fs::read_to_string(&path) {
            Ok(stored) => verify_password_hash(password, &stored),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "cannot read verification hash");
                false
            }
        }
    }

    // ------------------------------------------------------------------
    // Dataset persistence
    // ------------------------------------------------------------------

    /// Decrypt and parse the dataset.
    ///
    /// If no blob has been written yet, returns the default dataset
    /// without deriving any key.
    pub fn load(&self, password: &str) -> Result<Dataset> {
        let path = self.data_path();
        if !path.exists() {
            tracing::debug!("no data file yet, using default dataset");
            return Ok(Dataset::default());
        }

        let blob_json = fs::read_to_string(&path)?;
        let plaintext = zeroize::Zeroizing::new(self.engine.decrypt_json(&blob_json, password)?);
        let dataset = Dataset::from_json(&plaintext)?;

        tracing::debug!(connections = dataset.connections.len(), "dataset loaded");
        Ok(dataset)
    }

    /// Encrypt and persist the full dataset under `password`.
    ///
    /// The previous blob is only replaced once the new one is fully on
    /// disk.
    pub fn save(&self, dataset: &Dataset, password: &str) -> Result<()> {
        let plaintext = zeroize::Zeroizing::new(dataset.to_json()?);
        let blob = self.engine.encrypt(&plaintext, password)?;

        self.ensure_dir()?;
        write_atomic(&self.data_path(), blob.to_json()?.as_bytes())?;

        tracing::info!(connections = dataset.connections.len(), "dataset saved");
        Ok(())
    }

    /// Re-encrypt the dataset under `new_password` and update the
    /// verification hash.
    ///
    /// `old_password` must match the verification hash when one exists,
    /// otherwise `InvalidPassword` is returned.  If the dataset cannot be
    /// loaded with `old_password`, the load error is returned.  Either
    /// way no file is touched.
    pub fn change_master_password(&self, old_password: &str, new_password: &str) -> Result<()> {
        if self.has_master_password() && !self.verify_master_password(old_password) {
            tracing::warn!("master password change rejected: old password does not verify");
            return Err(VaultError::InvalidPassword);
        }

        let dataset = match self.load(old_password) {
            Ok(dataset) => dataset,
            Err(e) => {
                tracing::warn!(error = %e, "master password change aborted");
                return Err(e);
            }
        };

        self.save(&dataset, new_password)?;
        self.set_master_password(new_password)?;

        tracing::info!("master password changed (dataset re-encrypted)");
        Ok(())
    }

    // ------------------------------------------------------------------
    // Settings
    // ------------------------------------------------------------------

    /// Load plaintext settings, or defaults if none were saved.
    pub fn load_settings(&self) -> Result<Settings> {
        Settings::load(&self.settings_path())
    }

    /// Persist plaintext settings.
    pub fn save_settings(&self, settings: &Settings) -> Result<()> {
        self.ensure_dir()?;
        settings.save(&self.settings_path())
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    /// Returns the data directory.
    pub fn data_dir(&self) -> &Path {
        &self.dir
    }

    /// Path to the encrypted dataset.
    pub fn data_path(&self) -> PathBuf {
        self.dir.join(DATA_FILE)
    }

    /// Path to the verification hash.
    pub fn hash_path(&self) -> PathBuf {
        self.dir.join(HASH_FILE)
    }

    /// Path to the settings file.
    pub fn settings_path(&self) -> PathBuf {
        self.dir.join(SETTINGS_FILE)
    }

    /// The cipher engine new blobs are written with.
    pub fn engine(&self) -> &CipherEngine {
        &self.engine
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.dir.exists() {
            fs::create_dir_all(&self.dir)?;
        }
        Ok(())
    }
}

/// Write `contents` to `path` **atomically**.
///
/// Writes a temp file in the same directory, then renames it over the
/// target, so readers never see a half-written file and a failed write
/// leaves the old file untouched.  On Unix the temp file is created
/// owner-only (0o600) from the start.  The temp file never outlives a
/// failed call.
pub(crate) fn write_atomic(path: &Path, contents: &[u8]) -> Result<()> {
    let parent = path.parent().unwrap_or(Path::new("."));
    let tmp_path = parent.join(format!(
        ".{}.tmp",
        path.file_name().unwrap_or_default().to_string_lossy()
    ));

    let result = write_owner_only(&tmp_path, contents).and_then(|()| fs::rename(&tmp_path, path));
    if let Err(e) = result {
        let _ = fs::remove_file(&tmp_path);
        return Err(e.into());
    }
    Ok(())
}

fn write_owner_only(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    let mut options = fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let mut file = options.open(path)?;

    // A stale temp file keeps its old mode, so tighten it explicitly.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        file.set_permissions(fs::Permissions::from_mode(0o600))?;
    }

    file.write_all(contents)?;
    file.sync_all()
}
