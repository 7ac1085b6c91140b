// ABOUTME: Connection resolver choosing which patient's data stream to poll
// ABOUTME: Pure function over the live connection list and the configured patient id
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use librelinkup_core::models::ConnectionRecord;
use librelinkup_core::{CollectorError, CollectorResult};
use std::fmt::Write;

/// Pick the patient id to poll
///
/// - no connections: [`CollectorError::NoConnections`]
/// - one connection: its patient id, whatever is configured
/// - several: the configured id if it matches one of them
///
/// # Errors
///
/// Returns a configuration error when several connections exist and the
/// configured id is empty (listing every candidate) or matches none of them
pub fn resolve_patient_id(
    connections: &[ConnectionRecord],
    configured_patient_id: Option<&str>,
) -> CollectorResult<String> {
    match connections {
        [] => Err(CollectorError::NoConnections),
        [only] => Ok(only.patient_id.clone()),
        many => {
            let wanted = configured_patient_id.map_or("", str::trim);
            if wanted.is_empty() {
                return Err(CollectorError::config(format!(
                    "more than one specified patient-id was found:\n{} please set a patient_id in the config",
                    describe_candidates(many)
                )));
            }
            many.iter()
                .find(|c| c.patient_id == wanted)
                .map(|c| c.patient_id.clone())
                .ok_or_else(|| CollectorError::config("the specified patient-id was not found"))
        }
    }
}

/// One line per candidate: ` - <patient id>: <first> <last>`
#[must_use]
pub fn describe_candidates(connections: &[ConnectionRecord]) -> String {
    connections.iter().fold(String::new(), |mut out, c| {
        let _ = writeln!(out, " - {}: {}", c.patient_id, c.display_name());
        out
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use librelinkup_core::ErrorKind;

    fn record(patient_id: &str, first: &str, last: &str) -> ConnectionRecord {
        ConnectionRecord {
            patient_id: patient_id.to_owned(),
            first_name: first.to_owned(),
            last_name: last.to_owned(),
            ..ConnectionRecord::default()
        }
    }

    #[test]
    fn test_no_connections() {
        let err = resolve_patient_id(&[], Some("abc")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UpstreamEmpty);
    }

    #[test]
    fn test_single_connection_ignores_configured_id() {
        let only = [record("abc", "A", "B")];
        assert_eq!(resolve_patient_id(&only, None).unwrap(), "abc");
        assert_eq!(resolve_patient_id(&only, Some("other")).unwrap(), "abc");
    }

    #[test]
    fn test_several_connections() {
        let many = [record("a", "Alice", "Smith"), record("b", "Bob", "Jones")];

        let err = resolve_patient_id(&many, Some("  ")).unwrap_err();
        assert_eq!(
            err.to_string(),
            "more than one specified patient-id was found:\n - a: Alice Smith\n - b: Bob Jones\n please set a patient_id in the config"
        );

        let err = resolve_patient_id(&many, Some("c")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);

        assert_eq!(resolve_patient_id(&many, Some("b")).unwrap(), "b");
    }
}
