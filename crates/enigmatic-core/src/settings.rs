//! Serializable machine snapshots ("key files").

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{EnigmaError, EnigmaResult};
use crate::machine::{Machine, MachineBuilder};
use crate::reflector::ReflectorSpec;
use crate::rotor::{Rotor, RotorSpec};

/// The only snapshot layout this crate reads and writes.
pub const SCHEMA_VERSION: u32 = 1;

/// Full configuration and rotor state of a machine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub schema_version: u32,
    pub alphabet: String,
    pub rotor_specs: Vec<RotorSpec>,
    pub reflector_spec: ReflectorSpec,
    #[serde(default)]
    pub plugboard_pairs: BTreeMap<char, char>,
    #[serde(default)]
    pub current_rotor_positions: Vec<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

/// Free-form provenance attached to a key file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preset: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

#[derive(Deserialize)]
struct VersionProbe {
    schema_version: u32,
}

impl Settings {
    /// Snapshot a machine as it is right now.
    ///
    /// Rotor specs carry the current positions, so a machine restored from
    /// this snapshot treats them as its baseline.
    pub fn capture(machine: &Machine) -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            alphabet: machine.alphabet().as_string(),
            rotor_specs: machine.rotors().iter().map(Rotor::to_spec).collect(),
            reflector_spec: machine.reflector().to_spec(),
            plugboard_pairs: machine.plugboard().pairs_map(),
            current_rotor_positions: machine
                .current_rotor_positions()
                .into_iter()
                .map(|p| p as i64)
                .collect(),
            metadata: None,
        }
    }

    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Pretty-printed JSON.
    pub fn to_json(&self) -> EnigmaResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse a snapshot, rejecting any schema version other than
    /// [`SCHEMA_VERSION`] before looking at the rest of the document.
    pub fn from_json(json: &str) -> EnigmaResult<Self> {
        let probe: VersionProbe = serde_json::from_str(json)?;
        check_version(probe.schema_version)?;
        Ok(serde_json::from_str(json)?)
    }
}

fn check_version(actual: u32) -> EnigmaResult<()> {
    if actual != SCHEMA_VERSION {
        return Err(EnigmaError::UnsupportedSchemaVersion {
            expected: SCHEMA_VERSION,
            actual,
        });
    }
    Ok(())
}

impl Machine {
    /// Snapshot this machine. See [`Settings::capture`].
    pub fn settings(&self) -> Settings {
        Settings::capture(self)
    }

    /// Rebuild a machine through the validating constructors.
    ///
    /// The baseline comes from the rotor-spec positions; the current
    /// positions, when present, only move the rotors afterwards.
    pub fn from_settings(settings: &Settings) -> EnigmaResult<Self> {
        check_version(settings.schema_version)?;

        let symbols: Vec<char> = settings.alphabet.chars().collect();
        let mut machine = MachineBuilder::new()
            .alphabet(&symbols)?
            .rotor_specs(&settings.rotor_specs)?
            .reflector_spec(&settings.reflector_spec)?
            .plugboard_pairs(&settings.plugboard_pairs)?
            .build()?;

        if !settings.current_rotor_positions.is_empty() {
            machine.set_rotor_positions(&settings.current_rotor_positions)?;
        }
        Ok(machine)
    }

    /// Replace this machine's whole configuration. On error nothing changes.
    pub fn load_settings(&mut self, settings: &Settings) -> EnigmaResult<()> {
        *self = Self::from_settings(settings)?;
        Ok(())
    }

    pub fn to_json(&self) -> EnigmaResult<String> {
        self.settings().to_json()
    }

    pub fn from_json(json: &str) -> EnigmaResult<Self> {
        Self::from_settings(&Settings::from_json(json)?)
    }
}
