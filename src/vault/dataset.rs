//! The plaintext payload stored inside the encrypted blob.
//!
//! A `Dataset` holds every connection profile, the folder tree and the
//! tag set.  It serializes to camelCase JSON so vault files stay
//! readable by other tools once decrypted.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{Result, VaultError};

/// Path of the root folder every dataset starts with.
pub const ROOT_FOLDER: &str = "/";

/// Kind of remote-access client a connection is launched with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionType {
    Ssh,
    Rdp,
    Vnc,
    AnyDesk,
    TeamViewer,
}

impl fmt::Display for ConnectionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Ssh => "ssh",
            Self::Rdp => "rdp",
            Self::Vnc => "vnc",
            Self::AnyDesk => "anydesk",
            Self::TeamViewer => "teamviewer",
        };
        f.write_str(name)
    }
}

impl FromStr for ConnectionType {
    type Err = VaultError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "ssh" => Ok(Self::Ssh),
            "rdp" => Ok(Self::Rdp),
            "vnc" => Ok(Self::Vnc),
            "anydesk" => Ok(Self::AnyDesk),
            "teamviewer" => Ok(Self::TeamViewer),
            other => Err(VaultError::CommandFailed(format!(
                "unknown connection type '{other}' — supported: ssh, rdp, vnc, anydesk, teamviewer"
            ))),
        }
    }
}

/// A single remote-connection profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ConnectionType,
    /// Path of the folder this connection lives in.
    pub folder: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub host: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_file: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_command: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_used: Option<DateTime<Utc>>,
    #[serde(default)]
    pub favorite: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Connection {
    /// Create a connection in the root folder with a fresh id.
    pub fn new(name: &str, kind: ConnectionType, host: &str) -> Self {
        let now = Utc::now();
        Self {
            id: format!("conn-{}", now.timestamp_millis()),
            name: name.to_string(),
            kind,
            folder: ROOT_FOLDER.to_string(),
            tags: Vec::new(),
            host: host.to_string(),
            port: None,
            username: None,
            password: None,
            key_file: None,
            custom_command: None,
            notes: None,
            last_used: None,
            favorite: false,
            created_at: now,
            updated_at: now,
        }
    }
}

/// A node in the folder tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Folder {
    pub path: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expanded: Option<bool>,
}

/// Everything that lives inside the encrypted vault.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub connections: Vec<Connection>,
    #[serde(default)]
    pub folders: Vec<Folder>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Default for Dataset {
    /// A fresh vault: the root folder and nothing else.
    fn default() -> Self {
        Self {
            connections: Vec::new(),
            folders: vec![Folder {
                path: ROOT_FOLDER.to_string(),
                name: "Root".to_string(),
                expanded: Some(true),
            }],
            tags: Vec::new(),
        }
    }
}

impl Dataset {
    // ------------------------------------------------------------------
    // Serialization
    // ------------------------------------------------------------------

    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| VaultError::SerializationError(format!("dataset: {e}")))
    }

    /// Parse a dataset from JSON.
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text)
            .map_err(|e| VaultError::SerializationError(format!("dataset: {e}")))
    }

    // ------------------------------------------------------------------
    // Connections
    // ------------------------------------------------------------------

    /// Find a connection by id, falling back to an exact name match.
    pub fn find_connection(&self, id_or_name: &str) -> Option<&Connection> {
        self.connections
            .iter()
            .find(|c| c.id == id_or_name)
            .or_else(|| self.connections.iter().find(|c| c.name == id_or_name))
    }

    fn position(&self, id_or_name: &str) -> Result<usize> {
        self.connections
            .iter()
            .position(|c| c.id == id_or_name)
            .or_else(|| self.connections.iter().position(|c| c.name == id_or_name))
            .ok_or_else(|| VaultError::ConnectionNotFound(id_or_name.to_string()))
    }

    /// Add a connection.  Its tags are merged into the tag set.
    ///
    /// The connection's folder must exist.  If its id collides with an
    /// existing one (two adds within the same millisecond) a numeric
    /// suffix is appended.  Returns the id actually stored.
    pub fn add_connection(&mut self, mut connection: Connection) -> Result<String> {
        self.require_folder(&connection.folder)?;

        if self.connections.iter().any(|c| c.id == connection.id) {
            let base = connection.id.clone();
            let mut n = 2;
            while self
                .connections
                .iter()
                .any(|c| c.id == format!("{base}-{n}"))
            {
                n += 1;
            }
            connection.id = format!("{base}-{n}");
        }

        self.merge_tags(&connection.tags);
        let id = connection.id.clone();
        self.connections.push(connection);
        Ok(id)
    }

    /// Replace the connection with the same id.  Bumps `updated_at`.
    pub fn update_connection(&mut self, mut connection: Connection) -> Result<()> {
        self.require_folder(&connection.folder)?;
        let idx = self
            .connections
            .iter()
            .position(|c| c.id == connection.id)
            .ok_or_else(|| VaultError::ConnectionNotFound(connection.id.clone()))?;

        connection.updated_at = Utc::now();
        self.merge_tags(&connection.tags);
        self.connections[idx] = connection;
        Ok(())
    }

    /// Remove a connection and return it.
    pub fn delete_connection(&mut self, id_or_name: &str) -> Result<Connection> {
        let idx = self.position(id_or_name)?;
        Ok(self.connections.remove(idx))
    }

    /// Flip the favorite flag.  Returns the new value.
    pub fn toggle_favorite(&mut self, id_or_name: &str) -> Result<bool> {
        let idx = self.position(id_or_name)?;
        let conn = &mut self.connections[idx];
        conn.favorite = !conn.favorite;
        Ok(conn.favorite)
    }

    /// Record that a connection was just used.
    pub fn touch_last_used(&mut self, id_or_name: &str) -> Result<DateTime<Utc>> {
        let idx = self.position(id_or_name)?;
        let now = Utc::now();
        self.connections[idx].last_used = Some(now);
        Ok(now)
    }

    // ------------------------------------------------------------------
    // Folders
    // ------------------------------------------------------------------

    fn require_folder(&self, path: &str) -> Result<()> {
        if self.folders.iter().any(|f| f.path == path) {
            Ok(())
        } else {
            Err(VaultError::FolderNotFound(path.to_string()))
        }
    }

    /// Add a folder.  Paths are unique.
    pub fn add_folder(&mut self, path: &str, name: &str) -> Result<()> {
        if path.is_empty() {
            return Err(VaultError::CommandFailed("folder path cannot be empty".into()));
        }
        if self.folders.iter().any(|f| f.path == path) {
            return Err(VaultError::FolderAlreadyExists(path.to_string()));
        }
        self.folders.push(Folder {
            path: path.to_string(),
            name: name.to_string(),
            expanded: None,
        });
        Ok(())
    }

    /// Remove a folder.  Connections inside it move to the root folder.
    ///
    /// Returns how many connections were moved.
    pub fn delete_folder(&mut self, path: &str) -> Result<usize> {
        if path == ROOT_FOLDER {
            return Err(VaultError::CommandFailed(
                "the root folder cannot be removed".into(),
            ));
        }
        let before = self.folders.len();
        self.folders.retain(|f| f.path != path);
        if self.folders.len() == before {
            return Err(VaultError::FolderNotFound(path.to_string()));
        }

        let mut moved = 0;
        for conn in self.connections.iter_mut().filter(|c| c.folder == path) {
            conn.folder = ROOT_FOLDER.to_string();
            moved += 1;
        }
        Ok(moved)
    }

    // ------------------------------------------------------------------
    // Tags
    // ------------------------------------------------------------------

    fn merge_tags(&mut self, tags: &[String]) {
        for tag in tags {
            if !self.tags.contains(tag) {
                self.tags.push(tag.clone());
            }
        }
    }

    /// Add a tag.  Returns `false` if it was already present.
    pub fn add_tag(&mut self, tag: &str) -> bool {
        if self.tags.iter().any(|t| t == tag) {
            return false;
        }
        self.tags.push(tag.to_string());
        true
    }

    /// Remove a tag from the set and from every connection.
    ///
    /// Returns `true` if anything changed, including a tag that was
    /// only present on connections.
    pub fn remove_tag(&mut self, tag: &str) -> bool {
        let before = self.tags.len();
        self.tags.retain(|t| t != tag);
        let mut changed = self.tags.len() != before;

        for conn in &mut self.connections {
            let n = conn.tags.len();
            conn.tags.retain(|t| t != tag);
            changed |= conn.tags.len() != n;
        }
        changed
    }

    /// Rename a tag everywhere it appears.
    ///
    /// If `new` already exists the two tags are merged.
    pub fn rename_tag(&mut self, old: &str, new: &str) -> bool {
        if !self.tags.iter().any(|t| t == old) {
            return false;
        }
        let new_exists = self.tags.iter().any(|t| t == new);
        if new_exists {
            self.tags.retain(|t| t != old);
        } else {
            for t in self.tags.iter_mut().filter(|t| t.as_str() == old) {
                *t = new.to_string();
            }
        }

        for conn in &mut self.connections {
            let had_old = conn.tags.iter().any(|t| t == old);
            conn.tags.retain(|t| t != old);
            if had_old && !conn.tags.iter().any(|t| t == new) {
                conn.tags.push(new.to_string());
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_has_only_root_folder() {
        let d = Dataset::default();
        assert!(d.connections.is_empty());
        assert!(d.tags.is_empty());
        assert_eq!(d.folders.len(), 1);
        assert_eq!(d.folders[0].path, "/");
        assert_eq!(d.folders[0].name, "Root");
    }

    #[test]
    fn connection_serializes_camel_case() {
        let mut c = Connection::new("web", ConnectionType::Ssh, "10.0.0.1");
        c.key_file = Some("~/.ssh/id_ed25519".into());
        let json = serde_json::to_string(&c).unwrap();
        assert!(json.contains("\"type\":\"ssh\""));
        assert!(json.contains("\"keyFile\""));
        assert!(json.contains("\"createdAt\""));
        assert!(!json.contains("\"password\""));
    }

    #[test]
    fn parses_minimal_original_layout() {
        let json = r#"{"connections":[],"folders":[{"path":"/","name":"Root"}],"tags":[]}"#;
        let d = Dataset::from_json(json).unwrap();
        assert_eq!(d.folders[0].expanded, None);
        assert!(d.connections.is_empty());
    }

    #[test]
    fn connection_type_parses_case_insensitively() {
        assert_eq!("AnyDesk".parse::<ConnectionType>().unwrap(), ConnectionType::AnyDesk);
        assert_eq!("RDP".parse::<ConnectionType>().unwrap(), ConnectionType::Rdp);
        assert!("telnet".parse::<ConnectionType>().is_err());
    }

    #[test]
    fn connection_type_display_matches_serde() {
        for kind in [
            ConnectionType::Ssh,
            ConnectionType::Rdp,
            ConnectionType::Vnc,
            ConnectionType::AnyDesk,
            ConnectionType::TeamViewer,
        ] {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{kind}\""));
        }
    }

    #[test]
    fn add_connection_with_duplicate_id_gets_suffix() {
        let mut d = Dataset::default();
        let c = Connection::new("a", ConnectionType::Ssh, "h");
        let mut c2 = c.clone();
        c2.name = "b".into();
        let id1 = d.add_connection(c).unwrap();
        let id2 = d.add_connection(c2).unwrap();
        assert_ne!(id1, id2);
        assert_eq!(id2, format!("{id1}-2"));
    }
}
