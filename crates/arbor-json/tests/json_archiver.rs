use arbor_archive::{ArchiveError, Archiver, MAX_DEPTH};
use arbor_json::{JsonArchiver, JsonOptions};
use arbor_val::{Container, Persist, Value};
use pretty_assertions::assert_eq;

#[derive(Debug, Clone, PartialEq, Default)]
struct Waypoint {
    name: String,
    lat: f64,
    lon: f64,
}

#[derive(Debug, Clone, PartialEq, Default)]
struct Route {
    id: i64,
    closed: bool,
    points: Vec<Waypoint>,
}

impl Persist for Route {
    fn to_container(&self) -> Container {
        let mut c = Container::new()
            .with_attribute("id", self.id)
            .with_attribute("closed", self.closed);
        for p in &self.points {
            c.add_child(
                "point",
                Container::new()
                    .with_attribute("name", p.name.as_str())
                    .with_attribute("lat", p.lat)
                    .with_attribute("lon", p.lon),
            );
        }
        c
    }

    fn from_container(&mut self, c: &Container) {
        self.id = c.get_attribute_or("id", 0);
        self.closed = c.get_attribute_or("closed", false);
        self.points = c
            .children("point")
            .map(|p| Waypoint {
                name: p.get_attribute_or("name", String::new()),
                lat: p.get_attribute_or("lat", 0.0),
                lon: p.get_attribute_or("lon", 0.0),
            })
            .collect();
    }
}

fn route() -> Route {
    Route {
        id: -42,
        closed: true,
        points: vec![
            Waypoint {
                name: "start \"A\"".into(),
                lat: 52.520008,
                lon: 13.404954,
            },
            Waypoint {
                name: "end".into(),
                lat: -33.865143,
                lon: 151.2093,
            },
        ],
    }
}

#[test]
fn test_single_attribute_and_child() {
    let c = Container::new()
        .with_attribute("id", 5)
        .with_child("item", Container::new());

    let archiver = JsonArchiver::new();
    let json = archiver.save_string(&c, "root").unwrap();
    let mut loaded = Container::new();
    archiver.load_str(&json, &mut loaded, "root").unwrap();

    assert_eq!(loaded.get_attribute("id"), Some(&Value::Int(5)));
    assert_eq!(loaded.children("item").count(), 1);
    assert_eq!(loaded, c);
}

#[test]
fn test_compact_output() {
    let c = Container::new()
        .with_attribute("id", 5)
        .with_attribute("d", 2.0)
        .with_child("item", Container::new());
    let json = JsonArchiver::with_options(JsonOptions { pretty: false })
        .save_string(&c, "root")
        .unwrap();
    assert_eq!(
        json,
        r#"{"root":{"attributes":{"id":5,"d":2.0},"children":[{"item":{}}]}}"#
    );
}

#[test]
fn test_types_and_order_survive() {
    let c = Container::new()
        .with_attribute("z", "last?")
        .with_attribute("t", "5")
        .with_attribute("d", 1.0)
        .with_attribute("i", i64::MAX)
        .with_attribute("n", i64::MIN)
        .with_attribute("b", false)
        .with_attribute("u", "ünïcode ✓\n\t");

    let archiver = JsonArchiver::new();
    let mut loaded = Container::new();
    archiver
        .load_str(&archiver.save_string(&c, "v").unwrap(), &mut loaded, "v")
        .unwrap();
    assert_eq!(loaded, c);
    let keys: Vec<&str> = loaded.attributes().map(|(k, _)| k.as_str()).collect();
    assert_eq!(keys, vec!["z", "t", "d", "i", "n", "b", "u"]);
}

#[test]
fn test_object_round_trip() {
    let archiver = JsonArchiver::new();
    let json = archiver.save_string_object(&route(), "route").unwrap();
    let mut loaded = Route::default();
    archiver
        .load_str_object(&json, &mut loaded, "route")
        .unwrap();
    assert_eq!(loaded, route());
}

#[test]
fn test_non_finite_writes_nothing() {
    let c = Container::new().with_attribute("x", f64::NAN);
    let mut sink: Vec<u8> = Vec::new();
    let err = JsonArchiver::new().save(&mut sink, &c, "root").unwrap_err();
    assert!(matches!(err, ArchiveError::Unrepresentable { .. }));
    assert!(sink.is_empty());
}

#[test]
fn test_root_mismatch_leaves_object_untouched() {
    let archiver = JsonArchiver::new();
    let json = archiver.save_string_object(&route(), "route").unwrap();
    let mut target = Route::default();
    let err = archiver
        .load_str_object(&json, &mut target, "track")
        .unwrap_err();
    assert!(matches!(err, ArchiveError::RootMismatch { .. }));
    assert_eq!(target, Route::default());
}

#[test]
fn test_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("route.json");
    let archiver = JsonArchiver::new();
    archiver
        .save_file_object(&path, &route(), "route")
        .unwrap();

    let mut loaded = Container::new();
    archiver.load_file(&path, &mut loaded, "route").unwrap();
    assert_eq!(loaded, route().to_container());
}

#[test]
fn test_unwritable_path() {
    let dir = tempfile::tempdir().unwrap();
    let err = JsonArchiver::new()
        .save_file(&dir.path().join("x").join("y.json"), &Container::new(), "root")
        .unwrap_err();
    assert!(matches!(err, ArchiveError::Open { .. }));
}

fn nested(depth: usize) -> Container {
    let mut c = Container::new().with_attribute("leaf", 1);
    for _ in 0..depth {
        c = Container::new().with_child("n", c);
    }
    c
}

#[test]
fn test_deepest_tree_round_trips() {
    for archiver in [
        JsonArchiver::new(),
        JsonArchiver::with_options(JsonOptions { pretty: false }),
    ] {
        let c = nested(MAX_DEPTH);
        let mut loaded = Container::new();
        archiver
            .load_str(&archiver.save_string(&c, "root").unwrap(), &mut loaded, "root")
            .unwrap();
        assert_eq!(loaded, c);
    }
}

#[test]
fn test_too_deep_writes_nothing() {
    let mut sink: Vec<u8> = Vec::new();
    let err = JsonArchiver::new()
        .save(&mut sink, &nested(MAX_DEPTH + 1), "root")
        .unwrap_err();
    assert!(matches!(err, ArchiveError::Unrepresentable { .. }));
    assert!(sink.is_empty());
}
