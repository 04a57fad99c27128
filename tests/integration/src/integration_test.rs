//! End-to-end integration test for the convergence loop
//!
//! This test exercises the complete flow: config loading -> open -> check ->
//! converge -> save -> reopen.

use assert_fs::prelude::*;
use predicates::prelude::*;
use pretty_assertions::assert_eq;
use xmlfile_content::ValueDescriptor;
use xmlfile_core::{XmlFile, XmlFileConfig};
use xmlfile_fs::NormalizedPath;

const SERVER_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<Server port="8005">
  <Service name="Catalina">
    <Connector port="8080" protocol="HTTP/1.1"/>
    <Connector port="8009" protocol="AJP/1.3"/>
  </Service>
</Server>
"#;

/// Desired connectors, as a caller would declare them.
fn desired_connectors() -> Vec<(&'static str, ValueDescriptor)> {
    vec![
        (
            "8080",
            ValueDescriptor::new()
                .with_attribute("port", "8080")
                .with_attribute("protocol", "HTTP/1.1")
                .with_attribute("connectionTimeout", "20000"),
        ),
        (
            "8443",
            ValueDescriptor::new()
                .with_attribute("port", "8443")
                .with_attribute("protocol", "HTTP/1.1")
                .with_attribute("SSLEnabled", "true"),
        ),
    ]
}

/// One convergence pass. Returns whether anything had to change.
fn converge(file: &mut XmlFile) -> bool {
    let mut changed = false;
    for (port, desired) in desired_connectors() {
        let selector = format!("[@port='{port}']");
        let xpath = format!("//Service/Connector{selector}");
        if !file.matches(&xpath, &desired).unwrap() {
            file.set_tag("//Service", "Connector", &selector, &desired).unwrap();
            changed = true;
        }
    }
    if changed {
        file.save().unwrap();
    }
    changed
}

#[test]
fn test_converge_server_config() {
    let _ = xmlfile_core::logging::init();
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child("xmlfile.toml").write_str("indent = 4\n").unwrap();
    let server = temp.child("conf/server.xml");
    server.write_str(SERVER_XML).unwrap();

    let config = XmlFileConfig::load(temp.child("xmlfile.toml").path()).unwrap();
    let mut file = XmlFile::open_with_config(NormalizedPath::new(server.path()), config.clone()).unwrap();
    assert!(converge(&mut file));

    server.assert(predicate::str::contains(
        r#"<Connector port="8080" protocol="HTTP/1.1" connectionTimeout="20000"/>"#,
    ));
    server.assert(predicate::str::contains(
        r#"<Connector SSLEnabled="true" port="8443" protocol="HTTP/1.1"/>"#,
    ));
    server.assert(predicate::str::contains(r#"<Connector port="8009" protocol="AJP/1.3"/>"#));
    server.assert(predicate::str::starts_with(
        r#"<?xml version="1.0" encoding="UTF-8"?>"#,
    ));

    // A second run over the saved file has nothing left to do
    let saved = std::fs::read_to_string(server.path()).unwrap();
    let mut reopened = XmlFile::open_with_config(server.path(), config).unwrap();
    assert!(!converge(&mut reopened));
    assert_eq!(std::fs::read_to_string(server.path()).unwrap(), saved);
}

#[test]
fn test_converge_from_nothing() {
    let temp = assert_fs::TempDir::new().unwrap();
    let server = temp.child("server.xml");
    server.assert(predicate::path::missing());

    let mut file = XmlFile::open(server.path()).unwrap();
    assert!(!file.file_exists());

    let desired = ValueDescriptor::new().with_text("8080").with_attribute("name", "http");
    file.set_tag("/Server/Service", "Port", "[@name='http']", &desired).unwrap();
    file.save().unwrap();

    server.assert(predicate::path::is_file());
    let reopened = XmlFile::open(server.path()).unwrap();
    assert!(reopened.file_exists());
    assert!(reopened.matches("/Server/Service/Port[@name='http']", &desired).unwrap());
}

#[test]
fn test_observed_state_as_json() {
    let temp = assert_fs::TempDir::new().unwrap();
    let server = temp.child("server.xml");
    server.write_str(SERVER_XML).unwrap();

    let file = XmlFile::open(server.path()).unwrap();
    let doc = file.document().unwrap();
    let observed: Vec<ValueDescriptor> = file
        .find("//Connector")
        .unwrap()
        .into_iter()
        .map(|id| XmlFile::node_to_descriptor(doc.get(id).unwrap()))
        .collect();

    assert_eq!(
        serde_json::to_value(&observed).unwrap(),
        serde_json::json!([
            {"attributes": {"port": "8080", "protocol": "HTTP/1.1"}},
            {"attributes": {"port": "8009", "protocol": "AJP/1.3"}}
        ])
    );
}
