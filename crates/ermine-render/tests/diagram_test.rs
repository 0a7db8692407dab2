use ermine_core::{Entity, EntityRelationshipData, ReferenceError};
use ermine_layout::{ElasticLayoutOptions, Rect, Size};
use ermine_render::{
    DiagramFactory, DiagramKind, Error, Placement, Port, Region, RenderHost, SceneHost,
    SceneOptions,
};
use std::path::PathBuf;

fn repo_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .and_then(|p| p.parent())
        .expect("repo root")
        .to_path_buf()
}

fn fixture(name: &str) -> EntityRelationshipData {
    let path = repo_root().join("fixtures").join(name);
    let text = std::fs::read_to_string(&path).expect("read fixture");
    EntityRelationshipData::from_json_str(&text).expect("parse fixture")
}

fn customer_order() -> EntityRelationshipData {
    EntityRelationshipData::default()
        .with_entity("Customer", [("id", "int"), ("name", "text")])
        .with_entity("Order", [("id", "int"), ("customerId", "int")])
        .with_relationship(("Order", "customerId"), ("Customer", "id"))
}

/// Counts every host call; used to prove a failed construction touches nothing.
#[derive(Default)]
struct RecordingHost {
    calls: Vec<&'static str>,
}

impl RenderHost for RecordingHost {
    type Element = usize;

    fn render_entity(&mut self, _entity: &Entity) -> usize {
        self.calls.push("render_entity");
        self.calls.len()
    }
    fn set_collapsed(&mut self, _element: usize, _collapsed: bool) {
        self.calls.push("set_collapsed");
    }
    fn add_element(&mut self, _element: usize, _region: Region) {
        self.calls.push("add_element");
    }
    fn add_connector(&mut self, _source: Port<'_, usize>, _target: Port<'_, usize>) {
        self.calls.push("add_connector");
    }
    fn is_connected(&self, _a: usize, _b: usize) -> bool {
        false
    }
    fn clear(&mut self) {
        self.calls.push("clear");
    }
    fn shuffle(&mut self) {
        self.calls.push("shuffle");
    }
    fn bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, 100.0, 100.0)
    }
    fn element_size(&self, _element: usize) -> Size {
        Size::new(10.0, 10.0)
    }
    fn place(&mut self, _element: usize, _placement: Placement) {
        self.calls.push("place");
    }
    fn set_kind(&mut self, _kind: DiagramKind) {
        self.calls.push("set_kind");
    }
}

#[test]
fn elastic_end_to_end_customer_order() {
    let data = customer_order();
    let mut host = SceneHost::default();
    let diagram = DiagramFactory::new()
        .create_elastic_diagram(&mut host, &data, &ElasticLayoutOptions::default())
        .unwrap();

    assert_eq!(diagram.seed().len(), 2);
    for p in diagram.seed() {
        assert!((0.0..=1.0).contains(&p.x) && (0.0..=1.0).contains(&p.y));
    }
    assert!(diagram.stats().iterations > 0);

    let host = diagram.host();
    assert_eq!(host.kind(), Some(DiagramKind::Elastic));
    assert_eq!(host.names_in(Region::Main), ["Customer", "Order"]);
    assert_eq!(host.connectors().len(), 1);
    let c = &host.connectors()[0];
    assert_eq!(host.name(c.source), "Order");
    assert_eq!(c.source_property, "customerId");
    assert_eq!(host.name(c.target), "Customer");
    assert_eq!(c.target_property, "id");

    let bounds = host.bounds();
    for &el in host.scene_elements() {
        assert!(host.is_collapsed(el));
        assert!(host.is_draggable(el));
        assert!(bounds.contains_rect(&host.rect(el), 1e-6));
    }
}

#[test]
fn elastic_keeps_a_larger_graph_inside_the_host() {
    let data = fixture("shop.json");
    let mut host = SceneHost::new(SceneOptions {
        width: 640.0,
        height: 480.0,
        ..Default::default()
    });
    let options = ElasticLayoutOptions {
        boundary: ermine_layout::Boundary::Reflect,
        padding: 10.0,
        ..Default::default()
    };
    let diagram = DiagramFactory::new()
        .create_elastic_diagram(&mut host, &data, &options)
        .unwrap();

    let host = diagram.host();
    let area = host.bounds().inset(10.0);
    assert_eq!(host.scene_elements().len(), 6);
    assert_eq!(host.connectors().len(), 8);
    for &el in host.scene_elements() {
        assert!(area.contains_rect(&host.rect(el), 1e-6), "{}", host.name(el));
    }
}

#[test]
fn elastic_layout_is_reproducible() {
    let data = fixture("shop.json");
    let run = || {
        let mut host = SceneHost::default();
        DiagramFactory::new()
            .create_elastic_diagram(&mut host, &data, &ElasticLayoutOptions::default())
            .unwrap();
        host.snapshot()
    };
    assert_eq!(run(), run());
}

#[test]
fn invalid_options_fail_before_any_host_call() {
    let mut host = RecordingHost::default();
    let options = ElasticLayoutOptions {
        damping: 0.0,
        ..Default::default()
    };
    let err = DiagramFactory::new()
        .create_elastic_diagram(&mut host, &customer_order(), &options)
        .err()
        .unwrap();
    assert!(matches!(
        err,
        Error::Layout(ermine_layout::Error::InvalidOption { name: "damping", .. })
    ));
    assert!(host.calls.is_empty());
}

#[test]
fn invalid_host_bounds_fail_before_rendering() {
    let mut host = SceneHost::new(SceneOptions {
        width: -5.0,
        ..Default::default()
    });
    let err = DiagramFactory::new()
        .create_elastic_diagram(&mut host, &customer_order(), &ElasticLayoutOptions::default())
        .err()
        .unwrap();
    assert!(matches!(
        err,
        Error::Layout(ermine_layout::Error::InvalidOption {
            name: "host.width",
            ..
        })
    ));
    assert_eq!(host.rendered_count(), 0);
    assert!(host.scene_elements().is_empty());
    assert!(host.connectors().is_empty());
    assert_eq!(host.kind(), None);
}

#[test]
fn reference_error_renders_nothing() {
    let data = fixture("unknown_reference.json");
    let factory = DiagramFactory::new();

    let mut recording = RecordingHost::default();
    let err = factory
        .create_elastic_diagram(&mut recording, &data, &ElasticLayoutOptions::default())
        .err()
        .unwrap();
    match err {
        Error::Model(ermine_core::Error::Reference(ReferenceError::UnknownEntity {
            entity,
            ..
        })) => assert_eq!(entity, "Customer"),
        other => panic!("unexpected error: {other}"),
    }
    assert!(recording.calls.is_empty());

    let mut scene = SceneHost::default();
    assert!(factory.create_navigable_diagram(&mut scene, &data).is_err());
    assert!(factory.create_spectral_diagram(&mut scene, &data).is_err());
    assert_eq!(scene.rendered_count(), 0);
    assert!(scene.scene_elements().is_empty());
    assert!(scene.connectors().is_empty());
    assert_eq!(scene.kind(), None);
}

#[test]
fn unknown_property_is_a_reference_error_too() {
    let data = customer_order().with_relationship(("Order", "customerId"), ("Customer", "uuid"));
    let mut host = RecordingHost::default();
    let err = DiagramFactory::new()
        .create_spectral_diagram(&mut host, &data)
        .err()
        .unwrap();
    assert!(err.to_string().contains("Customer.uuid"), "{err}");
    assert!(host.calls.is_empty());
}

#[test]
fn spectral_maps_into_the_inner_eighty_percent() {
    let data = customer_order();
    let mut host = SceneHost::default();
    let diagram = DiagramFactory::new()
        .create_spectral_diagram(&mut host, &data)
        .unwrap();

    let points = diagram.points().to_vec();
    let host = diagram.host();
    assert_eq!(host.kind(), Some(DiagramKind::Spectral));
    assert_eq!(host.connectors().len(), 1);
    let bounds = host.bounds();
    for (&el, p) in host.scene_elements().iter().zip(&points) {
        let pos = host.position(el);
        assert!((pos.x - (0.8 * p.x + 0.1) * bounds.width).abs() < 1e-9);
        assert!((pos.y - (0.8 * p.y + 0.1) * bounds.height).abs() < 1e-9);
        assert!(host.is_collapsed(el) && host.is_draggable(el));
    }
}

#[test]
fn spectral_without_relationships_still_places_every_entity() {
    let data = EntityRelationshipData::default()
        .with_entity("A", [("id", "int")])
        .with_entity("B", [("id", "int")])
        .with_entity("C", [("id", "int")])
        .with_entity("D", [("id", "int")]);
    let mut host = SceneHost::default();
    let diagram = DiagramFactory::new()
        .create_spectral_diagram(&mut host, &data)
        .unwrap();

    assert_eq!(diagram.points().len(), 4);
    for p in diagram.points() {
        assert!(p.x.is_finite() && p.y.is_finite());
        assert!((0.0..=1.0).contains(&p.x) && (0.0..=1.0).contains(&p.y));
    }
    assert!(diagram.host().connectors().is_empty());
}

#[test]
fn empty_graph_is_not_an_error() {
    let data = EntityRelationshipData::default();
    let factory = DiagramFactory::new();

    let mut host = SceneHost::default();
    let elastic = factory
        .create_elastic_diagram(&mut host, &data, &ElasticLayoutOptions::default())
        .unwrap();
    assert!(elastic.seed().is_empty());
    assert!(elastic.stats().converged);

    let mut host = SceneHost::default();
    let spectral = factory.create_spectral_diagram(&mut host, &data).unwrap();
    assert!(spectral.points().is_empty());
    assert!(spectral.host().scene_elements().is_empty());
}

#[test]
fn diagram_exposes_canonical_elements() {
    let data = customer_order();
    let mut host = SceneHost::default();
    let diagram = DiagramFactory::new()
        .create_spectral_diagram(&mut host, &data)
        .unwrap();
    let base = diagram.diagram();

    let order = base.graph().entity_id("Order").unwrap();
    let element = base.element(order).unwrap();
    assert_eq!(base.entity_of(element), Some(order));
    assert_eq!(base.elements().len(), 2);
    assert!(matches!(
        base.entity_id("Invoice"),
        Err(Error::UnknownEntity { .. })
    ));
}
