//! Ansible inventory generation from Terraform outputs
//!
//! Reads `vm_public_ip.value` from a `terraform output -json` document and
//! writes a one-host INI inventory. The SSH private key output is parsed
//! but never written; the inventory only points at a configured key file.
//!
//! The output document is trusted as-is. It comes from a local command
//! (or file) with no authentication, so run this only against state you
//! control.

mod source;

pub use source::{JsonFile, OutputSource, TerraformCommand};

use serde::Deserialize;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{info, warn};

use crate::config::InventoryConfig;
use crate::errors::{Result, ServiceError};

/// The subset of `terraform output -json` this tool reads.
#[derive(Debug, Default, Deserialize)]
pub struct TerraformOutputs {
    #[serde(default)]
    pub vm_public_ip: Option<OutputValue>,
    #[serde(default)]
    pub vm_ssh_private_key: Option<OutputValue>,
}

#[derive(Debug, Deserialize)]
pub struct OutputValue {
    #[serde(default)]
    pub value: Option<String>,
}

impl TerraformOutputs {
    pub fn parse(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| {
            ServiceError::serialization(format!("Error parsing terraform output: {}", e))
        })
    }

    /// The VM address; empty strings count as missing.
    pub fn public_ip(&self) -> Option<&str> {
        self.vm_public_ip
            .as_ref()
            .and_then(|o| o.value.as_deref())
            .filter(|ip| !ip.is_empty())
    }

    pub fn has_private_key(&self) -> bool {
        self.vm_ssh_private_key
            .as_ref()
            .and_then(|o| o.value.as_deref())
            .is_some_and(|k| !k.is_empty())
    }
}

/// Result of a successful run.
#[derive(Debug, Clone)]
pub struct InventoryReport {
    pub public_ip: String,
    pub path: PathBuf,
}

pub struct InventoryGenerator {
    config: InventoryConfig,
}

impl InventoryGenerator {
    pub fn new(config: InventoryConfig) -> Self {
        Self { config }
    }

    /// Render the inventory text for one host.
    pub fn render(&self, public_ip: &str) -> String {
        let c = &self.config;
        format!(
            "[{group}]\n\
             {alias} ansible_host={ip} ansible_user={user} ansible_ssh_private_key_file={key}\n\
             \n\
             [all:vars]\n\
             ansible_python_interpreter={python}\n",
            group = c.host_group,
            alias = c.host_alias,
            ip = public_ip,
            user = c.ansible_user,
            key = c.private_key_file,
            python = c.python_interpreter,
        )
    }

    /// Fetch, parse, render and write. Nothing is written on any error.
    pub fn generate(&self, source: &dyn OutputSource, output: &Path) -> Result<InventoryReport> {
        warn!(
            "Trusting unauthenticated output from {}; the inventory will reference {}",
            source.describe(),
            self.config.private_key_file
        );

        let raw = source.fetch()?;
        let outputs = TerraformOutputs::parse(&raw)?;

        let public_ip = outputs.public_ip().ok_or_else(|| {
            ServiceError::missing_field("VM public IP not found in Terraform outputs")
        })?;

        if outputs.has_private_key() {
            info!("Ignoring vm_ssh_private_key output; key material is not written");
        }

        let content = self.render(public_ip);
        write_private_file(output, &content)?;

        info!("Generated {} with VM IP: {}", output.display(), public_ip);

        Ok(InventoryReport {
            public_ip: public_ip.to_string(),
            path: output.to_path_buf(),
        })
    }
}

/// Write `content` next to `path` and rename it into place, owner-only on unix.
///
/// A failed write leaves any existing file at `path` untouched.
fn write_private_file(path: &Path, content: &str) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| {
        ServiceError::file_operation(format!(
            "Failed to create temporary file in {}: {}",
            dir.display(),
            e
        ))
    })?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        tmp.as_file()
            .set_permissions(std::fs::Permissions::from_mode(0o600))?;
    }

    tmp.write_all(content.as_bytes())?;
    tmp.as_file().sync_all()?;

    tmp.persist(path).map_err(|e| {
        ServiceError::file_operation(format!("Failed to write {}: {}", path.display(), e.error))
    })?;
    Ok(())
}
