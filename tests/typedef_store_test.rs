use std::collections::BTreeSet;
use std::sync::Arc;
use std::thread;
use typegraph::graph::{Direction, GraphEngine};
use typegraph::{
    BaseTypeDef, GraphProvider, TypeCategory, TypeDef, TypeDefGraphStore, TypeStoreConfig, TypeStoreError,
};

fn setup() -> (GraphProvider, TypeDefGraphStore) {
    let config = TypeStoreConfig::default();
    let provider = GraphProvider::in_memory(&config);
    let store = TypeDefGraphStore::new(&provider, config);
    (provider, store)
}

fn names(items: &[&str]) -> BTreeSet<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_create_then_read_back() {
    let (_provider, store) = setup();

    let mut def = TypeDef::entity(
        BaseTypeDef::new("hive_table")
            .with_description("a hive table")
            .with_type_version("2.1"),
    );
    let vertex = store.create_type_vertex(&mut def).unwrap();

    let mut read = BaseTypeDef::default();
    store.vertex_to_type_def(vertex, &mut read).unwrap();

    let created = def.base();
    assert_eq!(read.name, "hive_table");
    assert_eq!(read.description.as_deref(), Some("a hive table"));
    assert_eq!(read.type_version.as_deref(), Some("2.1"));
    assert_eq!(read.guid, created.guid);
    assert_eq!(read.create_time, created.create_time);
    assert_eq!(read.update_time, created.update_time);
    assert_eq!(read.version, Some(1));
}

#[test]
fn test_blank_name_leaves_no_vertex() {
    let (provider, store) = setup();

    let mut def = TypeDef::entity(BaseTypeDef::new("   "));
    let err = store.create_type_vertex(&mut def).unwrap_err();

    assert_eq!(err, TypeStoreError::Validation("Type name can't be null/empty".to_string()));
    assert_eq!(provider.graph().read().unwrap().vertex_count(), 0);
    assert!(def.base().guid.is_none());
}

#[test]
fn test_get_or_create_edge_twice() {
    let (_provider, store) = setup();
    let a = store.create_type_vertex(&mut TypeDef::entity(BaseTypeDef::new("A"))).unwrap();
    let b = store.create_type_vertex(&mut TypeDef::entity(BaseTypeDef::new("B"))).unwrap();
    let label = store.supertype_label().clone();

    let first = store.get_or_create_edge(a, b, &label).unwrap();
    let second = store.get_or_create_edge(a, b, &label).unwrap();

    assert_eq!(first, second);
    let graph = store.graph().read().unwrap();
    let edges = graph.edges(a, Direction::Out, Some(&label));
    assert_eq!(edges.len(), 1);
    assert_eq!(edges[0].in_vertex(), b);
}

#[test]
fn test_concurrent_get_or_create_edge() {
    let (_provider, store) = setup();
    let a = store.create_type_vertex(&mut TypeDef::entity(BaseTypeDef::new("A"))).unwrap();
    let b = store.create_type_vertex(&mut TypeDef::entity(BaseTypeDef::new("B"))).unwrap();
    let store = Arc::new(store);

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                let label = store.supertype_label().clone();
                store.get_or_create_edge(a, b, &label).unwrap()
            })
        })
        .collect();
    let ids: BTreeSet<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    assert_eq!(ids.len(), 1);
    assert_eq!(store.get_super_type_names(a).unwrap(), names(&["B"]));
}

#[test]
fn test_delete_with_references() {
    let (provider, store) = setup();
    let target = store.create_type_vertex(&mut TypeDef::entity(BaseTypeDef::new("DataSet"))).unwrap();
    let referrer = store.create_type_vertex(&mut TypeDef::entity(BaseTypeDef::new("hive_table"))).unwrap();
    let parent = store.create_type_vertex(&mut TypeDef::entity(BaseTypeDef::new("Asset"))).unwrap();

    let label = store.supertype_label().clone();
    let incoming = store.get_or_create_edge(referrer, target, &label).unwrap();
    store.get_or_create_edge(target, parent, &label).unwrap();

    assert_eq!(store.delete_type_vertex(target), Err(TypeStoreError::HasReferences(target)));
    assert!(store.is_type_vertex(target).unwrap());
    assert_eq!(provider.graph().read().unwrap().edge_count(), 2);

    provider.graph().write().unwrap().remove_edge(incoming).unwrap();
    store.delete_type_vertex(target).unwrap();

    let graph = provider.graph().read().unwrap();
    assert!(!graph.has_vertex(target));
    assert_eq!(graph.edge_count(), 0);
    assert!(graph.edges(parent, Direction::In, None).is_empty());
}

#[test]
fn test_supertype_names_skip_unknown() {
    let (_provider, store) = setup();
    store.create_type_vertex(&mut TypeDef::entity(BaseTypeDef::new("A"))).unwrap();
    store.create_type_vertex(&mut TypeDef::entity(BaseTypeDef::new("B"))).unwrap();
    let v = store.create_type_vertex(&mut TypeDef::entity(BaseTypeDef::new("V"))).unwrap();

    let edges = store.create_super_type_edges(v, &names(&["A", "B", "C"])).unwrap();

    assert_eq!(edges.len(), 2);
    assert_eq!(store.get_super_type_names(v).unwrap(), names(&["A", "B"]));
}

#[test]
fn test_lookups_agree() {
    let (_provider, store) = setup();
    let mut def = TypeDef::classification(BaseTypeDef::new("PII"));
    let vertex = store.create_type_vertex(&mut def).unwrap();
    let guid = def.base().guid.clone().unwrap();

    assert_eq!(
        store.find_type_vertex_by_name_and_category("PII", TypeCategory::Trait).unwrap(),
        Some(vertex)
    );
    assert_eq!(store.find_type_vertex_by_guid(&guid).unwrap(), Some(vertex));
    assert_eq!(
        store.find_type_vertex_by_guid_and_category(&guid, TypeCategory::Trait).unwrap(),
        Some(vertex)
    );
    assert_eq!(store.find_type_vertex_by_name("nothing").unwrap(), None);
}

#[test]
fn test_find_all_is_restartable() {
    let (_provider, store) = setup();
    for name in ["level", "state", "mode"] {
        store.create_type_vertex(&mut TypeDef::enumeration(BaseTypeDef::new(name))).unwrap();
    }
    store.create_type_vertex(&mut TypeDef::structure(BaseTypeDef::new("serde"))).unwrap();

    let first: Vec<_> = store.find_type_vertices_by_category(TypeCategory::Enum).unwrap().collect();
    let again: Vec<_> = store.find_type_vertices_by_category(TypeCategory::Enum).unwrap().collect();
    assert_eq!(first.len(), 3);
    assert_eq!(first, again);
}

#[test]
fn test_update_keeps_identity() {
    let (_provider, store) = setup();
    let mut def = TypeDef::entity(BaseTypeDef::new("hive_db"));
    let vertex = store.create_type_vertex(&mut def).unwrap();
    let guid = def.base().guid.clone();

    let mut change = TypeDef::entity(BaseTypeDef::new("hive_db").with_description("updated"));
    store.update_type_vertex(vertex, &mut change).unwrap();
    store.update_type_vertex(vertex, &mut change).unwrap();

    let loaded = store.load_type_def(vertex).unwrap();
    assert_eq!(loaded.category(), TypeCategory::Class);
    assert_eq!(loaded.base().guid, guid);
    assert_eq!(loaded.base().description.as_deref(), Some("updated"));
    assert_eq!(loaded.base().version, Some(3));
}

#[test]
fn test_teardown_empties_store() {
    let (provider, store) = setup();
    store.create_type_vertex(&mut TypeDef::entity(BaseTypeDef::new("A"))).unwrap();

    provider.teardown();

    assert_eq!(store.find_type_vertex_by_name("A").unwrap(), None);
    assert_eq!(store.find_type_vertices_by_category(TypeCategory::Class).unwrap().count(), 0);
}
