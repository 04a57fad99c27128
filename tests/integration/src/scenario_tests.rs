//! Scenario tests for the mutator
//!
//! Each module walks one situation a configuration-management run meets in
//! practice, starting from a file on disk and checking the file afterwards.

use pretty_assertions::assert_eq;
use xmlfile_content::ValueDescriptor;
use xmlfile_core::{Error, Transition, XmlFile};
use xmlfile_test_utils::file::TestXmlFile;
use xmlfile_test_utils::fixtures::{RESOURCES_CONFIG, SERVER_CONFIG, SIMPLE_CONFIG};

// =============================================================================
// Scenario 1: Upsert into an existing file
// =============================================================================

mod s1_upsert {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn update_then_append() {
        let fixture = TestXmlFile::new().with_content(SIMPLE_CONFIG);
        let mut file = XmlFile::open(fixture.path()).unwrap();

        file.set_tag("//config", "item", "[@id='1']", &ValueDescriptor::new().with_text("y"))
            .unwrap();
        let appended = ValueDescriptor::new().with_text("z");
        let created = file.set_tag("//config", "item", "[@id='2']", &appended).unwrap();
        assert_eq!(created.created().count(), 1);

        // The id comes from the suffix, so the next run finds the same child
        let again = file.set_tag("//config", "item", "[@id='2']", &appended).unwrap();
        assert_eq!(again.created().count(), 0);
        assert_eq!(again.updated().count(), 1);
        file.save().unwrap();

        assert_eq!(
            fixture.read(),
            concat!(
                "<?xml version=\"1.0\"?>\n",
                "<config>\n",
                "  <item id=\"1\">y</item>\n",
                "  <item id=\"2\">z</item>\n",
                "</config>\n",
            )
        );
    }

    #[test]
    fn namespaced_file_is_queried_without_prefixes() {
        let fixture = TestXmlFile::new().with_content(SERVER_CONFIG);
        let mut file = XmlFile::open(fixture.path()).unwrap();

        let outcome = file
            .set_tag(
                "/Server/Service/Engine",
                "Host",
                "[@name='localhost']",
                &ValueDescriptor::new().with_attribute("autoDeploy", "false"),
            )
            .unwrap();

        assert_eq!(outcome.changes[0].transition, Transition::Updated);
        assert!(
            file.matches(
                "//Host",
                &ValueDescriptor::new().with_attributes([
                    ("name", "localhost"),
                    ("appBase", "webapps"),
                    ("autoDeploy", "false"),
                ])
            )
            .unwrap()
        );
    }

    #[test]
    fn missing_parent_is_reported() {
        let fixture = TestXmlFile::new().with_content(SIMPLE_CONFIG);
        let mut file = XmlFile::open(fixture.path()).unwrap();

        let err = file
            .set_tag("/config/section", "item", "", &ValueDescriptor::new())
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Unable to set <item>. No parents found for the xpath /config/section"
        );
        assert_eq!(fixture.read(), SIMPLE_CONFIG);
    }
}

// =============================================================================
// Scenario 2: First run against a missing file
// =============================================================================

mod s2_create {
    use super::*;

    #[test]
    fn chain_is_synthesized_and_written() {
        let fixture = TestXmlFile::new();
        let mut file = XmlFile::open(fixture.path()).unwrap();

        file.set_tag("/a/b", "c", "", &ValueDescriptor::new().with_text("hello"))
            .unwrap();

        fixture.assert_contains("<c>hello</c>");
        assert!(file.matches("/a/b/c/text()", &ValueDescriptor::new().with_text("hello")).unwrap());
    }
}

// =============================================================================
// Scenario 3: Pruning unmanaged content
// =============================================================================

mod s3_prune {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn only_managed_resources_remain() {
        let fixture = TestXmlFile::new().with_content(RESOURCES_CONFIG);
        let mut file = XmlFile::open(fixture.path()).unwrap();

        file.remove_elements("/resources").unwrap();
        file.save().unwrap();

        let reopened = XmlFile::open(fixture.path()).unwrap();
        assert_eq!(reopened.find("/resources/node()").unwrap().len(), 2);
        assert!(!reopened.exists("//notes").unwrap());
        assert!(reopened.exists("//resource[@uri='jdbc:audit']").unwrap());
    }

    #[test]
    fn remove_tag_then_save() {
        let fixture = TestXmlFile::new().with_content(RESOURCES_CONFIG);
        let mut file = XmlFile::open(fixture.path()).unwrap();

        assert_eq!(file.remove_tag("//resource[starts-with(@uri, 'jdbc:a')]").unwrap(), 1);
        file.save().unwrap();

        assert!(!fixture.read().contains("jdbc:audit"));
    }

    #[test]
    fn pruning_needs_a_file() {
        let fixture = TestXmlFile::new();
        let mut file = XmlFile::open(fixture.path()).unwrap();
        assert!(matches!(
            file.remove_elements("/resources"),
            Err(Error::NoDocument { .. })
        ));
    }
}
