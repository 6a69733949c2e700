//! Configuration loading and resolution
//!
//! Two YAML files drive the engine: an address book mapping reference keys
//! to full [`LedgerAddress`] records, and a set of balance definitions
//! naming a time axis and a list of address references. Resolution replaces
//! every reference with its full address record up front, so queries never
//! touch configuration again.
//!
//! Address book:
//!
//! ```yaml
//! "acme:cash":
//!   legal_entity: acme-uk
//!   namespace: settlement
//!   name: cash
//!   currency: GBP
//!   account_id: acc-001
//! ```
//!
//! Balance definitions:
//!
//! ```yaml
//! receivables:
//!   time_axis: committed
//!   addresses: ["acme:cash"]
//! ```

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use crate::types::{BalanceDefinition, ConfigError, LedgerAddress, TimeAxis};

/// A balance definition as written in YAML, before address resolution.
#[derive(Debug, Clone, Deserialize)]
pub struct RawBalanceDefinition {
    pub time_axis: TimeAxis,
    pub addresses: Vec<String>,
}

/// Load and parse the address book file.
pub fn load_address_book(path: &Path) -> Result<HashMap<String, LedgerAddress>, ConfigError> {
    read_yaml(path)
}

/// Load and parse the balance definition file, before resolution.
pub fn load_raw_definitions(
    path: &Path,
) -> Result<HashMap<String, RawBalanceDefinition>, ConfigError> {
    read_yaml(path)
}

/// Load both configuration files and resolve every balance definition.
pub fn load_balance_definitions(
    addresses_path: &Path,
    definitions_path: &Path,
) -> Result<HashMap<String, BalanceDefinition>, ConfigError> {
    let book = load_address_book(addresses_path)?;
    let raw = load_raw_definitions(definitions_path)?;
    resolve(&book, raw)
}

/// Substitute address references with full address records.
///
/// Rejects dangling references, definitions with no addresses, and
/// definitions whose addresses disagree on currency.
pub fn resolve(
    book: &HashMap<String, LedgerAddress>,
    raw: HashMap<String, RawBalanceDefinition>,
) -> Result<HashMap<String, BalanceDefinition>, ConfigError> {
    let mut resolved = HashMap::with_capacity(raw.len());
    for (name, definition) in raw {
        if definition.addresses.is_empty() {
            return Err(ConfigError::EmptyDefinition { name });
        }
        let mut addresses = Vec::with_capacity(definition.addresses.len());
        for reference in &definition.addresses {
            let address = book
                .get(reference)
                .ok_or_else(|| ConfigError::dangling_address(reference))?;
            addresses.push(address.clone());
        }
        let first_currency = &addresses[0].currency;
        if let Some(other) = addresses.iter().find(|a| &a.currency != first_currency) {
            return Err(ConfigError::MixedCurrency {
                name,
                first: first_currency.clone(),
                other: other.currency.clone(),
            });
        }
        resolved.insert(
            name.clone(),
            BalanceDefinition {
                name,
                time_axis: definition.time_axis,
                addresses,
            },
        );
    }
    Ok(resolved)
}

fn read_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|err| ConfigError::Io {
        path: path.display().to_string(),
        message: err.to_string(),
    })?;
    serde_yaml::from_str(&contents).map_err(|err| ConfigError::Parse {
        path: path.display().to_string(),
        message: err.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn address(account_id: &str, currency: &str) -> LedgerAddress {
        LedgerAddress {
            legal_entity: "acme-uk".to_string(),
            namespace: "settlement".to_string(),
            name: "cash".to_string(),
            currency: currency.to_string(),
            account_id: account_id.to_string(),
        }
    }

    fn book() -> HashMap<String, LedgerAddress> {
        let mut book = HashMap::new();
        book.insert("acme:cash".to_string(), address("acc-001", "GBP"));
        book.insert("acme:payable".to_string(), address("acc-002", "GBP"));
        book.insert("acme:eur".to_string(), address("acc-003", "EUR"));
        book
    }

    fn raw(time_axis: TimeAxis, addresses: &[&str]) -> RawBalanceDefinition {
        RawBalanceDefinition {
            time_axis,
            addresses: addresses.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn resolves_references_into_full_addresses() {
        let mut input = HashMap::new();
        input.insert(
            "receivables".to_string(),
            raw(TimeAxis::Reporting, &["acme:cash", "acme:payable"]),
        );

        let resolved = resolve(&book(), input).unwrap();
        let definition = &resolved["receivables"];
        assert_eq!(definition.name, "receivables");
        assert_eq!(definition.time_axis, TimeAxis::Reporting);
        assert_eq!(
            definition.addresses,
            vec![address("acc-001", "GBP"), address("acc-002", "GBP")]
        );
    }

    #[test]
    fn dangling_reference_is_rejected() {
        let mut input = HashMap::new();
        input.insert(
            "receivables".to_string(),
            raw(TimeAxis::Committed, &["acme:missing"]),
        );

        let err = resolve(&book(), input).unwrap_err();
        assert_eq!(err, ConfigError::dangling_address("acme:missing"));
    }

    #[test]
    fn mixed_currencies_are_rejected() {
        let mut input = HashMap::new();
        input.insert(
            "mixed".to_string(),
            raw(TimeAxis::Committed, &["acme:cash", "acme:eur"]),
        );

        let err = resolve(&book(), input).unwrap_err();
        assert_eq!(
            err,
            ConfigError::MixedCurrency {
                name: "mixed".to_string(),
                first: "GBP".to_string(),
                other: "EUR".to_string(),
            }
        );
    }

    #[test]
    fn empty_definition_is_rejected() {
        let mut input = HashMap::new();
        input.insert("empty".to_string(), raw(TimeAxis::Committed, &[]));

        let err = resolve(&book(), input).unwrap_err();
        assert_eq!(
            err,
            ConfigError::EmptyDefinition {
                name: "empty".to_string()
            }
        );
    }

    #[test]
    fn loads_and_resolves_from_yaml_files() {
        let address_yaml = "\"acme:cash\":\n  legal_entity: acme-uk\n  namespace: settlement\n  name: cash\n  currency: GBP\n  account_id: acc-001\n";
        let mut addresses = NamedTempFile::new().expect("Failed to create temp file");
        addresses
            .write_all(address_yaml.as_bytes())
            .expect("Failed to write temp file");

        let definition_yaml = "receivables:\n  time_axis: committed\n  addresses: [\"acme:cash\"]\n";
        let mut definitions = NamedTempFile::new().expect("Failed to create temp file");
        definitions
            .write_all(definition_yaml.as_bytes())
            .expect("Failed to write temp file");

        let resolved =
            load_balance_definitions(addresses.path(), definitions.path()).unwrap();
        assert_eq!(resolved.len(), 1);
        assert_eq!(
            resolved["receivables"].addresses[0].account_id,
            "acc-001"
        );
    }

    #[test]
    fn missing_file_reports_io_error_with_path() {
        let err = load_address_book(Path::new("no/such/file.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(err.to_string().contains("no/such/file.yaml"));
    }

    #[test]
    fn malformed_yaml_reports_parse_error() {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(b"acme:cash: [not a mapping\n")
            .expect("Failed to write temp file");

        let err = load_address_book(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
