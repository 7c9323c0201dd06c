use crate::archiver::XmlOptions;
use crate::{TYPES_NS, TYPES_PREFIX};
use arbor_archive::{ArchiveError, ArchiveResult, MAX_DEPTH};
use arbor_val::{Container, Value};

/// Renders a whole document into a string. Nothing reaches the sink until
/// every name and value has been checked.
pub(crate) fn write_document(
    container: &Container,
    root_name: &str,
    options: &XmlOptions,
) -> ArchiveResult<String> {
    let mut writer = XmlWriter {
        xml: String::new(),
        options,
    };
    if options.declaration {
        writer.xml.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
        writer.newline();
    }
    writer.element(root_name, container, 0)?;
    Ok(writer.xml)
}

struct XmlWriter<'a> {
    xml: String,
    options: &'a XmlOptions,
}

impl XmlWriter<'_> {
    fn element(&mut self, name: &str, container: &Container, depth: usize) -> ArchiveResult<()> {
        check_name(name)?;
        if depth > MAX_DEPTH {
            return Err(ArchiveError::Unrepresentable {
                name: name.to_string(),
                reason: format!("nested deeper than {} levels", MAX_DEPTH),
            });
        }
        tracing::trace!(name, depth, "writing element");

        // start tag
        self.indent(depth);
        self.xml.push('<');
        self.xml.push_str(name);
        if depth == 0 {
            self.xml
                .push_str(&format!(" xmlns:{}=\"{}\"", TYPES_PREFIX, TYPES_NS));
        }

        // fill attributes
        for (k, v) in container.attributes() {
            check_name(k)?;
            let text = escape_attr(k, v)?;
            self.xml.push_str(&format!(" {}=\"{}\"", k, text));
            if !v.is_text() {
                self.xml
                    .push_str(&format!(" {}:{}=\"{}\"", TYPES_PREFIX, k, v.kind()));
            }
        }

        if container.child_count() == 0 {
            self.xml.push_str("/>");
            self.newline();
            return Ok(());
        }

        self.xml.push('>');
        self.newline();
        for (kid_name, kid) in container.kids() {
            self.element(kid_name, kid, depth + 1)?;
        }

        // end tag
        self.indent(depth);
        self.xml.push_str(&format!("</{}>", name));
        self.newline();
        Ok(())
    }

    fn indent(&mut self, depth: usize) {
        if let Some(width) = self.options.indent {
            self.xml.push_str(&" ".repeat(width * depth));
        }
    }

    fn newline(&mut self) {
        if self.options.indent.is_some() {
            self.xml.push('\n');
        }
    }
}

/// XML 1.0 names without namespace prefixes, excluding the reserved `xml*`
/// space.
pub(crate) fn is_xml_name(name: &str) -> bool {
    let mut chars = name.chars();
    chars.next().is_some_and(is_name_start_char)
        && chars.all(is_name_char)
        && !name.to_ascii_lowercase().starts_with("xml")
}

fn is_name_start_char(c: char) -> bool {
    matches!(
        c,
        'A'..='Z'
            | 'a'..='z'
            | '_'
            | '\u{C0}'..='\u{D6}'
            | '\u{D8}'..='\u{F6}'
            | '\u{F8}'..='\u{2FF}'
            | '\u{370}'..='\u{37D}'
            | '\u{37F}'..='\u{1FFF}'
            | '\u{200C}'..='\u{200D}'
            | '\u{2070}'..='\u{218F}'
            | '\u{2C00}'..='\u{2FEF}'
            | '\u{3001}'..='\u{D7FF}'
            | '\u{F900}'..='\u{FDCF}'
            | '\u{FDF0}'..='\u{FFFD}'
            | '\u{10000}'..='\u{EFFFF}'
    )
}

fn is_name_char(c: char) -> bool {
    is_name_start_char(c)
        || matches!(
            c,
            '-' | '.' | '0'..='9' | '\u{B7}' | '\u{300}'..='\u{36F}' | '\u{203F}'..='\u{2040}'
        )
}

fn check_name(name: &str) -> ArchiveResult<()> {
    if is_xml_name(name) {
        Ok(())
    } else {
        Err(ArchiveError::invalid_name(name))
    }
}

fn escape_attr(name: &str, value: &Value) -> ArchiveResult<String> {
    let text = value.to_text();
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            // references keep attribute-value normalization from eating them
            '\n' => escaped.push_str("&#10;"),
            '\r' => escaped.push_str("&#13;"),
            '\t' => escaped.push_str("&#9;"),
            c if is_forbidden_char(c) => {
                return Err(ArchiveError::Unrepresentable {
                    name: name.to_string(),
                    reason: format!("character U+{:04X} is not allowed in XML 1.0", c as u32),
                });
            }
            c => escaped.push(c),
        }
    }
    Ok(escaped)
}

fn is_forbidden_char(c: char) -> bool {
    matches!(
        c,
        '\u{0}'..='\u{8}' | '\u{B}' | '\u{C}' | '\u{E}'..='\u{1F}' | '\u{FFFE}' | '\u{FFFF}'
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn compact() -> XmlOptions {
        XmlOptions {
            indent: None,
            declaration: false,
        }
    }

    #[test]
    fn test_container_to_xml() {
        let mut node = Container::new();
        node.set_attribute("name", "ming");
        node.set_attribute("age", 12);

        let mut kid = Container::new();
        kid.set_attribute("name", "Math");
        kid.set_attribute("score", 145);
        node.add_child("score", kid);

        let xml = write_document(&node, "test", &compact()).unwrap();
        let expected = concat!(
            r#"<test xmlns:arbor="urn:arbor:types" name="ming" age="12" arbor:age="int">"#,
            r#"<score name="Math" score="145" arbor:score="int"/>"#,
            r#"</test>"#,
        );
        assert_eq!(xml, expected);
    }

    #[test]
    fn test_indented_document() {
        let node = Container::new()
            .with_attribute("ok", true)
            .with_child(
                "group",
                Container::new().with_child("file", Container::new().with_attribute("ratio", 0.5)),
            );
        let xml = write_document(&node, "root", &XmlOptions::default()).unwrap();
        let expected = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
            <root xmlns:arbor=\"urn:arbor:types\" ok=\"true\" arbor:ok=\"bool\">\n  \
            <group>\n    \
            <file ratio=\"0.5\" arbor:ratio=\"double\"/>\n  \
            </group>\n\
            </root>\n";
        assert_eq!(xml, expected);
    }

    #[test]
    fn test_escaping() {
        let node = Container::new().with_attribute("t", "a<b>&\"c'\n\td");
        let xml = write_document(&node, "r", &compact()).unwrap();
        assert_eq!(
            xml,
            r#"<r xmlns:arbor="urn:arbor:types" t="a&lt;b&gt;&amp;&quot;c&apos;&#10;&#9;d"/>"#
        );
    }

    #[test]
    fn test_invalid_names() {
        for bad in ["", "1abc", "a b", "ns:tag", "xmlthing", "a<b"] {
            let node = Container::new().with_attribute(bad, 1);
            let err = write_document(&node, "r", &compact()).unwrap_err();
            assert!(matches!(err, ArchiveError::InvalidName { .. }), "{bad}");
            assert!(write_document(&Container::new(), bad, &compact()).is_err());
        }
        assert!(is_xml_name("_a.b-c1"));
        assert!(is_xml_name("größe"));
    }

    #[test]
    fn test_name_characters_follow_xml() {
        for good in ["größe", "日本", "a·b", "x\u{301}", "Ωmega"] {
            assert!(is_xml_name(good), "{good}");
        }
        for bad in ["ª", "º", "a²", "·a", "-a", "a\u{D7}b", "a\u{F7}"] {
            assert!(!is_xml_name(bad), "{bad}");
            let node = Container::new().with_child(bad, Container::new());
            assert!(matches!(
                write_document(&node, "r", &compact()),
                Err(ArchiveError::InvalidName { .. })
            ));
        }
    }

    #[test]
    fn test_depth_limit() {
        let mut deep = Container::new();
        for _ in 0..MAX_DEPTH {
            deep = Container::new().with_child("n", deep);
        }
        assert!(write_document(&deep, "r", &compact()).is_ok());

        let deeper = Container::new().with_child("n", deep);
        assert!(matches!(
            write_document(&deeper, "r", &compact()),
            Err(ArchiveError::Unrepresentable { .. })
        ));
    }

    #[test]
    fn test_control_characters_rejected() {
        let node = Container::new().with_attribute("t", "bell\u{7}");
        let err = write_document(&node, "r", &compact()).unwrap_err();
        assert!(matches!(err, ArchiveError::Unrepresentable { .. }));
    }
}
