//! The security-node suite.
//!
//! Declares every check a provisioned security node must satisfy. Checks
//! specific to one major version or OS family carry an [`Applicability`];
//! per-plugin checks are expanded from the profile's plugin list.

use crate::assertions::{ApiRequest, Assertion};
use crate::checks::check::{expand, Applicability, Check};
use crate::checks::registry::CheckRegistry;
use crate::error::Result;
use crate::http::{Credentials, JsonPath};
use crate::profile::{ExpectedProfile, OsFamily};
use crate::retry::RetryPolicy;
use serde_json::json;
use std::time::Duration;

/// Configuration directory of the security node instance.
pub const CONF_DIR: &str = "/etc/elasticsearch/security_node";
/// Account owning the node's files.
pub const ES_USER: &str = "elasticsearch";
/// Service name of the node instance.
pub const SERVICE: &str = "security_node_elasticsearch";
/// Plugin installation directory.
pub const PLUGIN_DIR: &str = "/usr/share/elasticsearch/plugins";
/// Templates directory.
pub const TEMPLATES_DIR: &str = "/etc/elasticsearch/templates";
/// HTTP port of the node.
pub const HTTP_PORT: u16 = 9200;

const TEMPLATE_ATTEMPTS: u32 = 3;
const TEMPLATE_WAIT: Duration = Duration::from_secs(10);

fn admin() -> Credentials {
    Credentials::new("es_admin", "changeMeAgain")
}

fn elastic() -> Credentials {
    Credentials::new("elastic", "elasticChanged")
}

fn conf(file: &str) -> String {
    format!("{}/{}", CONF_DIR, file)
}

fn owned_file(path: &str) -> Assertion {
    Assertion::All(vec![
        Assertion::is_file(path),
        Assertion::owned_by(path, ES_USER),
    ])
}

fn owned_directory(path: &str) -> Assertion {
    Assertion::All(vec![
        Assertion::is_directory(path),
        Assertion::owned_by(path, ES_USER),
    ])
}

/// `"number" : "<version>"` in the root endpoint body.
fn version_pattern(version: &str) -> String {
    format!(r#""number"\s*:\s*"{}""#, regex::escape(version))
}

fn literal_checks(file: &str, path: &str, literals: &[&str]) -> Vec<Check> {
    let mut seen = Vec::new();
    let mut checks = Vec::new();
    for literal in literals {
        if seen.contains(literal) {
            continue;
        }
        seen.push(*literal);
        checks.push(Check::new(
            format!("{} contains '{}'", file, literal),
            Assertion::contains(path, *literal),
        ));
    }
    checks
}

/// Build the security-node suite for `profile`.
///
/// # Errors
///
/// Returns `DuplicateCheck` if two checks end up with the same description,
/// which can only happen through the profile's plugin list.
pub fn security_node_suite(profile: &ExpectedProfile) -> Result<CheckRegistry> {
    let mut registry = CheckRegistry::new();
    let version = profile.version.as_str();
    let elasticsearch_yml = conf("elasticsearch.yml");
    let log4j2 = conf("log4j2.properties");

    registry.register_all(vec![
        Check::new(
            format!("user {} exists", ES_USER),
            Assertion::UserExists {
                name: ES_USER.to_string(),
            },
        ),
        Check::new(
            format!("service {} is running", SERVICE),
            Assertion::ServiceRunning {
                name: SERVICE.to_string(),
            },
        ),
        Check::new(
            format!("package {} is installed", profile.package_name),
            Assertion::PackageInstalled {
                name: profile.package_name.clone(),
            },
        ),
        Check::new(
            "elasticsearch.yml is a file owned by elasticsearch",
            owned_file(&elasticsearch_yml),
        ),
        Check::new(
            "log4j2.properties is a file owned by elasticsearch",
            owned_file(&log4j2),
        ),
    ])?;

    registry.register_all(literal_checks(
        "elasticsearch.yml",
        &elasticsearch_yml,
        &[
            "node.name: localhost-security_node",
            "cluster.name: elasticsearch",
        ],
    ))?;

    let path_conf = format!("path.conf: {}", CONF_DIR);
    registry.register_all(vec![
        Check::new(
            "elasticsearch.yml sets path.conf",
            Assertion::contains(&elasticsearch_yml, path_conf.as_str()),
        )
        .when(Applicability::legacy()),
        Check::new(
            "elasticsearch.yml does not set path.conf",
            Assertion::contains(&elasticsearch_yml, path_conf.as_str()).negate(),
        )
        .when(Applicability::current()),
    ])?;

    registry.register_all(literal_checks(
        "elasticsearch.yml",
        &elasticsearch_yml,
        &[
            "path.data: /var/lib/elasticsearch/localhost-security_node",
            "path.logs: /var/log/elasticsearch/localhost-security_node",
        ],
    ))?;

    registry.register_all(vec![
        Check::new(
            format!("port {} is listening", HTTP_PORT),
            Assertion::PortListening { port: HTTP_PORT },
        ),
        Check::new(
            format!("reported version is {}", version),
            Assertion::body_matches(ApiRequest::get("/", &admin()), version_pattern(version)),
        ),
    ])?;

    for absent in [
        "/etc/init.d/elasticsearch",
        "/usr/lib/systemd/system/elasticsearch.service",
        "/etc/elasticsearch/elasticsearch.yml",
        "/etc/elasticsearch/logging.yml",
    ] {
        registry.register(Check::new(
            format!("{} does not exist", absent),
            Assertion::exists(absent).negate(),
        ))?;
    }

    registry.register_all(vec![
        Check::new(
            "/etc/default/elasticsearch is readable",
            Assertion::matches("/etc/default/elasticsearch", ""),
        )
        .when(Applicability::OsFamilyIn(vec![
            OsFamily::Debian,
            OsFamily::Ubuntu,
        ])),
        Check::new(
            "/etc/sysconfig/elasticsearch is readable",
            Assertion::matches("/etc/sysconfig/elasticsearch", ""),
        )
        .when(Applicability::OsFamilyIn(vec![
            OsFamily::Centos,
            OsFamily::Redhat,
        ])),
    ])?;

    // x-pack ships as a plugin only on the legacy line
    let xpack_plugin_dir = format!("{}/x-pack", PLUGIN_DIR);
    registry.register_all(
        vec![
            Check::new(
                "plugins directory is owned by elasticsearch",
                owned_directory(PLUGIN_DIR),
            ),
            Check::new(
                "x-pack plugin directory is owned by elasticsearch",
                owned_directory(&xpack_plugin_dir),
            ),
            Check::new(
                "x-pack is listed in node plugins",
                Assertion::body_contains(
                    ApiRequest::get("/_nodes/plugins?pretty=true", &admin()),
                    "x-pack",
                ),
            ),
            Check::new(
                format!("x-pack plugin version is {}", version),
                Assertion::json_equals(
                    ApiRequest::get("/_nodes/plugins", &admin()),
                    plugin_version_path("x-pack"),
                    version,
                ),
            ),
        ]
        .into_iter()
        .map(|check| check.when(Applicability::legacy())),
    )?;

    registry.register_all(vec![
        Check::new(
            "license is active",
            Assertion::body_contains(
                ApiRequest::get("/_license?pretty=true", &admin()),
                r#""status" : "active""#,
            ),
        ),
        Check::new(
            "x-pack config directory is owned by elasticsearch",
            owned_directory(&conf("x-pack")),
        ),
    ])?;

    registry.register_all(expand(&profile.plugins, |plugin| {
        Check::new(
            format!("plugin {} directory is owned by elasticsearch", plugin),
            owned_directory(&format!("{}/{}", PLUGIN_DIR, plugin)),
        )
    }))?;
    registry.register_all(expand(&profile.plugins, |plugin| {
        Check::new(
            format!("plugin {} version is {}", plugin, version),
            Assertion::json_equals(
                ApiRequest::get("/_nodes/plugins", &admin()),
                plugin_version_path(plugin),
                version,
            ),
        )
    }))?;

    let security_dir = format!("{}{}", CONF_DIR, profile.config_subdir_suffix);
    for (file, literals) in [
        ("users_roles", &["admin:es_admin", "power_user:testUser"][..]),
        ("users", &["testUser:", "es_admin:"][..]),
    ] {
        let path = format!("{}/{}", security_dir, file);
        registry.register(Check::new(
            format!("{} is owned by elasticsearch", file),
            Assertion::owned_by(&path, ES_USER),
        ))?;
        registry.register_all(literal_checks(file, &path, literals))?;
    }

    registry.register_all(vec![
        Check::new(
            "superuser role is defined",
            Assertion::JsonHasPath {
                request: ApiRequest::get("/_xpack/security/role", &admin()),
                path: JsonPath::keys(&["superuser"]),
            },
        ),
        Check::new(
            "templates directory is owned by elasticsearch",
            owned_directory(TEMPLATES_DIR),
        ),
        Check::new(
            "basic.json template is a file owned by elasticsearch",
            owned_file(&format!("{}/basic.json", TEMPLATES_DIR)),
        ),
    ])?;

    let template_retry = RetryPolicy::new(TEMPLATE_ATTEMPTS, TEMPLATE_WAIT);
    let template = ApiRequest::get("/_template/basic", &admin());
    registry.register_all(vec![
        Check::new(
            "template basic is registered",
            Assertion::body_matches(template.clone(), "basic"),
        )
        .with_retry(template_retry),
        Check::new(
            "template basic has the expected contents",
            Assertion::All(vec![
                Assertion::json_equals(
                    template.clone(),
                    JsonPath::keys(&["basic", "settings", "index", "number_of_shards"]),
                    "1",
                ),
                Assertion::json_equals(
                    template,
                    JsonPath::keys(&["basic", "mappings", "type1", "_source", "enabled"]),
                    false,
                ),
            ]),
        )
        .with_retry(template_retry),
    ])?;

    registry.register_all(literal_checks(
        "elasticsearch.yml",
        &elasticsearch_yml,
        &[
            "security.authc.realms.file1.order: 0",
            "security.authc.realms.file1.type: file",
            "security.authc.realms.native1.order: 1",
            "security.authc.realms.native1.type: native",
        ],
    ))?;

    let role_mapping = format!("{}/role_mapping.yml", security_dir);
    registry.register(Check::new(
        "role_mapping.yml is owned by elasticsearch",
        Assertion::owned_by(&role_mapping, ES_USER),
    ))?;
    registry.register_all(literal_checks(
        "role_mapping.yml",
        &role_mapping,
        &[
            "power_user:",
            "- cn=admins,dc=example,dc=com",
            "user:",
            "- cn=admins,dc=example,dc=com",
        ],
    ))?;

    registry.register(Check::new(
        format!("kibana4_server sees version {}", version),
        Assertion::body_matches(
            ApiRequest::get("/", &Credentials::new("kibana4_server", "changeMe")),
            version_pattern(version),
        ),
    ))?;

    let users = ApiRequest::get("/_xpack/security/user", &elastic());
    for (user, role) in [
        ("elastic", "superuser"),
        ("kibana", "kibana_system"),
        ("kibana4_server", "kibana4_server"),
        ("logstash_system", "logstash_system"),
    ] {
        registry.register(Check::new(
            format!("security user {} has role {}", user, role),
            Assertion::All(vec![
                Assertion::json_equals(users.clone(), JsonPath::keys(&[user, "username"]), user),
                Assertion::json_equals(
                    users.clone(),
                    JsonPath::keys(&[user, "roles"]),
                    json!([role]),
                ),
                Assertion::json_equals(users.clone(), JsonPath::keys(&[user, "enabled"]), true),
            ]),
        ))?;
    }

    registry.register_all(vec![
        Check::new(
            format!("logstash_system sees version {}", version),
            Assertion::body_matches(
                ApiRequest::get("/", &Credentials::new("logstash_system", "aNewLogstashPassword")),
                version_pattern(version),
            ),
        ),
        // default kibana password is gone from the current line
        Check::new(
            format!("kibana sees version {}", version),
            Assertion::json_equals(
                ApiRequest::get("/", &Credentials::new("kibana", "changeme")),
                JsonPath::keys(&["version", "number"]),
                version,
            ),
        )
        .when(Applicability::legacy()),
    ])?;

    tracing::debug!("Built security node suite with {} checks", registry.len());
    Ok(registry)
}

/// `nodes.*.plugins[name=<plugin>].version`
fn plugin_version_path(plugin: &str) -> JsonPath {
    JsonPath::keys(&["nodes"])
        .first()
        .key("plugins")
        .find("name", plugin)
        .key("version")
}
