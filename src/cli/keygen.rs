//! `keygen` and `version`

use std::path::Path;

use crate::error::{CliError, Result};
use crate::storage::encrypted::KdfSettings;
use crate::wallet::keygen::{
    generate_key_files, key_json, key_json_string, load_key_file, regenerate_from_key_file,
    EMPTY_PASSWORD_WARNING,
};
use crate::wallet::signer;

pub struct KeygenRequest<'a> {
    pub prefix: Option<&'a str>,
    pub from_key: bool,
    pub json: bool,
    pub password: &'a str,
    pub with_address: bool,
}

/// The confirmation printed after the key files are written
pub fn wrote_files_line(prefix: &str, with_address: bool) -> String {
    if with_address {
        format!("Wrote files {prefix}.{{key,pub,id,addr}}.")
    } else {
        format!("Wrote files {prefix}.{{key,pub,id}}.")
    }
}

pub fn keygen(req: KeygenRequest<'_>) -> Result<()> {
    if req.json {
        let key = if req.from_key {
            let path = req
                .prefix
                .ok_or_else(|| CliError::Input("no keyfile".to_string()))?;
            load_key_file(Path::new(path))?
        } else {
            signer::generate_key()
        };
        if req.password.is_empty() {
            println!("{EMPTY_PASSWORD_WARNING}");
        }
        let json = key_json(&key, req.password, KdfSettings::default())?;
        println!("{}", key_json_string(&json)?);
        return Ok(());
    }

    let prefix = req
        .prefix
        .ok_or_else(|| CliError::Input("no prefix".to_string()))?;
    if prefix.is_empty() {
        return Err(CliError::Input(format!("invalid prefix {prefix}")));
    }
    let prefix = if req.from_key {
        regenerate_from_key_file(prefix, req.with_address)?
    } else {
        generate_key_files(prefix, req.with_address)?;
        prefix.to_string()
    };
    println!("{}", wrote_files_line(&prefix, req.with_address));
    Ok(())
}

/// `<client> version <crate version>`
pub fn version_line(client: &str) -> String {
    format!("{client} version {}", env!("CARGO_PKG_VERSION"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrote_files_line() {
        assert_eq!(wrote_files_line("node", false), "Wrote files node.{key,pub,id}.");
        assert_eq!(
            wrote_files_line("node", true),
            "Wrote files node.{key,pub,id,addr}."
        );
    }

    #[test]
    fn test_keygen_requires_prefix() {
        let req = KeygenRequest {
            prefix: None,
            from_key: false,
            json: false,
            password: "",
            with_address: false,
        };
        assert_eq!(keygen(req).unwrap_err().to_string(), "no prefix");

        let req = KeygenRequest {
            prefix: None,
            from_key: true,
            json: true,
            password: "",
            with_address: false,
        };
        assert_eq!(keygen(req).unwrap_err().to_string(), "no keyfile");
    }

    #[test]
    fn test_keygen_writes_files() {
        let dir = tempfile::tempdir().unwrap();
        let prefix = dir.path().join("bp01").to_string_lossy().into_owned();
        keygen(KeygenRequest {
            prefix: Some(&prefix),
            from_key: false,
            json: false,
            password: "",
            with_address: true,
        })
        .unwrap();
        for ext in ["key", "pub", "id", "addr"] {
            assert!(dir.path().join(format!("bp01.{ext}")).is_file());
        }
    }

    #[test]
    fn test_version_line() {
        assert!(version_line("aergocli").starts_with("aergocli version "));
    }
}
