//! Sample documents.

/// The single-item document used by the upsert scenarios.
pub const SIMPLE_CONFIG: &str = r#"<config><item id="1">x</item></config>"#;

/// A namespaced server configuration with nested services.
pub const SERVER_CONFIG: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<srv:Server xmlns:srv="urn:example:server" port="8005" shutdown="SHUTDOWN">
  <!-- Global listeners -->
  <srv:Listener className="VersionLoggerListener"/>
  <srv:Service name="Catalina">
    <srv:Connector port="8080" protocol="HTTP/1.1" connectionTimeout="20000"/>
    <srv:Engine name="Catalina" defaultHost="localhost">
      <srv:Host name="localhost" appBase="webapps"/>
    </srv:Engine>
  </srv:Service>
</srv:Server>
"#;

/// A resource list mixing managed and unmanaged children.
pub const RESOURCES_CONFIG: &str = r#"<?xml version="1.0"?>
<resources>
  <resource uri="jdbc:main" Puppet::Util::XmlFile.Managed="true">main</resource>
  <resource uri="jdbc:legacy">legacy</resource>
  <!-- left by hand -->
  <resource uri="jdbc:audit" Puppet::Util::XmlFile.Managed="true"/>
  <notes>unmanaged text</notes>
</resources>
"#;
