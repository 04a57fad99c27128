//! Loading, saving and file synthesis

use pretty_assertions::assert_eq;
use xmlfile_core::{Error, NodeKind, XmlFile, XmlFileConfig};
use xmlfile_test_utils::file::TestXmlFile;
use xmlfile_test_utils::fixtures::{SERVER_CONFIG, SIMPLE_CONFIG};

#[test]
fn test_load_strips_namespaces_and_blank_text() {
    let fixture = TestXmlFile::new().with_content(SERVER_CONFIG);
    let file = XmlFile::open(fixture.path()).unwrap();

    assert!(file.file_exists());
    assert!(file.exists("/Server/Service/Connector[@port='8080']").unwrap());

    let doc = file.document().unwrap();
    let root = doc.get(doc.root_element().unwrap()).unwrap();
    assert!(root.attribute("xmlns:srv").is_none());
    assert!(root.children().all(|c| c.kind() != NodeKind::Text));
}

#[test]
fn test_save_drops_namespaces_and_keeps_declaration() {
    let fixture = TestXmlFile::new().with_content(SERVER_CONFIG);
    let mut file = XmlFile::open(fixture.path()).unwrap();
    file.save().unwrap();

    insta::assert_snapshot!(fixture.read().trim_end(), @r###"
    <?xml version="1.0" encoding="UTF-8"?>
    <Server port="8005" shutdown="SHUTDOWN">
      <!-- Global listeners -->
      <Listener className="VersionLoggerListener"/>
      <Service name="Catalina">
        <Connector port="8080" protocol="HTTP/1.1" connectionTimeout="20000"/>
        <Engine name="Catalina" defaultHost="localhost">
          <Host name="localhost" appBase="webapps"/>
        </Engine>
      </Service>
    </Server>
    "###);
}

#[test]
fn test_create_xml_builds_chain() {
    let fixture = TestXmlFile::new();
    let mut file = XmlFile::open(fixture.path()).unwrap();
    assert!(!file.file_exists());

    let leaf = file.create_xml("/a/b", "c", Some("hello")).unwrap();

    assert!(file.file_exists());
    assert_eq!(
        fixture.read(),
        "<?xml version=\"1.0\"?>\n<a>\n  <b>\n    <c>hello</c>\n  </b>\n</a>\n"
    );

    let doc = file.document().unwrap();
    let node = doc.get(leaf).unwrap();
    assert_eq!(node.name(), "c");
    assert_eq!(node.text_content(), "hello");
    let chain: Vec<_> = node.ancestors().filter(|n| n.is_element()).map(|n| n.name()).collect();
    assert_eq!(chain, vec!["b", "a"]);
}

#[test]
fn test_create_xml_relative_and_descendant_paths() {
    let fixture = TestXmlFile::new();
    let mut file = XmlFile::open(fixture.path()).unwrap();

    file.create_xml("//config", "item", None).unwrap();

    assert_eq!(fixture.read(), "<?xml version=\"1.0\"?>\n<config>\n  <item/>\n</config>\n");
    assert!(file.exists("/config/item").unwrap());
}

#[test]
fn test_create_xml_rejects_invalid_segment() {
    let fixture = TestXmlFile::new();
    let mut file = XmlFile::open(fixture.path()).unwrap();

    let err = file.create_xml("/config[@a='1']", "item", None).unwrap_err();
    assert!(matches!(err, Error::Content(xmlfile_content::Error::InvalidName(_))));
    fixture.assert_not_exists();
}

#[test]
fn test_save_into_missing_directory_fails() {
    let fixture = TestXmlFile::new().with_name("missing/dir/config.xml");
    let mut file = XmlFile::open(fixture.path()).unwrap();

    let err = file.create_xml("/config", "item", None).unwrap_err();
    match err {
        Error::Fs(fs_err) => assert_eq!(fs_err.io_kind(), Some(std::io::ErrorKind::NotFound)),
        other => panic!("unexpected error {other:?}"),
    }
    assert!(file.document().is_none());
}

#[test]
fn test_mutations_need_a_document() {
    let fixture = TestXmlFile::new();
    let mut file = XmlFile::open(fixture.path()).unwrap();

    assert!(matches!(file.remove_tag("//a"), Err(Error::NoDocument { .. })));
    assert!(matches!(file.remove_elements("//a"), Err(Error::NoDocument { .. })));
    assert!(matches!(file.save(), Err(Error::NoDocument { .. })));
    // Queries stay quiet
    assert!(file.find("//a").unwrap().is_empty());
    assert!(!file.exists("//a").unwrap());
}

#[test]
fn test_config_indent_and_marker() {
    let fixture = TestXmlFile::new().with_content(
        r#"<config><keep Managed="yes"/><drop/></config>"#,
    );
    let config = XmlFileConfig::from_toml_str("managed_marker = \"Managed\"\nindent = 4").unwrap();
    let mut file = XmlFile::open_with_config(fixture.path(), config).unwrap();

    file.remove_elements("/config").unwrap();
    file.save().unwrap();

    assert_eq!(
        fixture.read(),
        "<?xml version=\"1.0\"?>\n<config>\n    <keep Managed=\"yes\"/>\n</config>\n"
    );
}

#[test]
fn test_render_does_not_write() {
    let fixture = TestXmlFile::new().with_content(SIMPLE_CONFIG);
    let mut file = XmlFile::open(fixture.path()).unwrap();
    file.remove_tag("//item").unwrap();

    assert_eq!(file.render().unwrap(), "<?xml version=\"1.0\"?>\n<config/>\n");
    assert_eq!(fixture.read(), SIMPLE_CONFIG);
}
