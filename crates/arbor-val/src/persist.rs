use crate::Container;

/// Capability of a domain object to snapshot itself into a [`Container`]
/// and to reinitialize itself from one.
///
/// How fields map onto attributes and children is entirely up to the
/// implementor. `from_container` should treat missing or malformed entries
/// as "keep the current value" unless the object has a better default.
pub trait Persist {
    fn to_container(&self) -> Container;

    fn from_container(&mut self, container: &Container);
}

impl Persist for Container {
    fn to_container(&self) -> Container {
        self.clone()
    }

    fn from_container(&mut self, container: &Container) {
        *self = container.clone();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default, PartialEq)]
    struct Color {
        r: u8,
        g: u8,
        b: u8,
        name: String,
    }

    impl Persist for Color {
        fn to_container(&self) -> Container {
            Container::new()
                .with_attribute("r", self.r)
                .with_attribute("g", self.g)
                .with_attribute("b", self.b)
                .with_attribute("name", self.name.as_str())
        }

        fn from_container(&mut self, c: &Container) {
            self.r = c.get_attribute_or("r", self.r);
            self.g = c.get_attribute_or("g", self.g);
            self.b = c.get_attribute_or("b", self.b);
            if let Some(name) = c.get_attribute_as::<String>("name") {
                self.name = name;
            }
        }
    }

    #[test]
    fn test_object_round_trip() {
        let red = Color {
            r: 255,
            g: 0,
            b: 0,
            name: "red".into(),
        };
        let mut copy = Color::default();
        copy.from_container(&red.to_container());
        assert_eq!(copy, red);
    }

    #[test]
    fn test_missing_fields_keep_values() {
        let mut c = Color {
            r: 1,
            g: 2,
            b: 3,
            name: "dim".into(),
        };
        c.from_container(&Container::new().with_attribute("g", 200));
        assert_eq!(c.r, 1);
        assert_eq!(c.g, 200);
        assert_eq!(c.name, "dim");
    }

    #[test]
    fn test_container_is_persist() {
        let src = Container::new().with_attribute("a", 1);
        let mut dst = Container::new().with_attribute("b", 2);
        dst.from_container(&src.to_container());
        assert_eq!(dst, src);
    }
}
