//! System state assertions.

use super::Outcome;
use crate::error::ProbeError;
use crate::host::Host;

fn observed(ok: bool, yes: String, no: String) -> Outcome {
    if ok {
        Outcome::Match(yes)
    } else {
        Outcome::Mismatch(no)
    }
}

/// A system user named `name` exists.
pub fn user_exists(host: &dyn Host, name: &str) -> Result<Outcome, ProbeError> {
    Ok(observed(
        host.user_exists(name)?,
        format!("user {} exists", name),
        format!("user {} does not exist", name),
    ))
}

/// The package `name` is installed.
pub fn package_installed(host: &dyn Host, name: &str) -> Result<Outcome, ProbeError> {
    Ok(observed(
        host.package_installed(name)?,
        format!("package {} is installed", name),
        format!("package {} is not installed", name),
    ))
}

/// The service `name` is running.
pub fn service_running(host: &dyn Host, name: &str) -> Result<Outcome, ProbeError> {
    Ok(observed(
        host.service_running(name)?,
        format!("service {} is running", name),
        format!("service {} is not running", name),
    ))
}

/// Something accepts connections on `port`.
pub fn port_listening(host: &dyn Host, port: u16) -> Result<Outcome, ProbeError> {
    Ok(observed(
        host.port_listening(port)?,
        format!("port {} is listening", port),
        format!("port {} is not listening", port),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assertions::testing::FakeHost;

    fn host() -> FakeHost {
        let mut host = FakeHost::default();
        host.users.insert("elasticsearch".into());
        host.packages.insert("elasticsearch".into());
        host.services.insert("security_node_elasticsearch".into());
        host.ports.insert(9200);
        host
    }

    #[test]
    fn present_state_matches() {
        let host = host();
        assert!(user_exists(&host, "elasticsearch").unwrap().is_match());
        assert!(package_installed(&host, "elasticsearch").unwrap().is_match());
        assert!(service_running(&host, "security_node_elasticsearch")
            .unwrap()
            .is_match());
        assert!(port_listening(&host, 9200).unwrap().is_match());
    }

    #[test]
    fn absent_state_mismatches_with_name() {
        let host = host();
        let outcome = service_running(&host, "elasticsearch").unwrap();
        assert_eq!(
            outcome,
            Outcome::Mismatch("service elasticsearch is not running".into())
        );
        assert!(!port_listening(&host, 9300).unwrap().is_match());
        assert!(!package_installed(&host, "kibana").unwrap().is_match());
        assert!(!user_exists(&host, "kibana").unwrap().is_match());
    }
}
