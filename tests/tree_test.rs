//! Tests for data attachment and node queries

use rstest::{fixture, rstest};
use serde_json::{json, Value};

use treekit::domain::{
    add_data_to_forest, build_trees, find_node, DataConfig, RawDataConfig, Record, RecordId,
    Tree, TreeConfig, TreeError,
};
use treekit::util::testing;

fn records(value: Value) -> Vec<Record> {
    serde_json::from_value(value).expect("array of objects")
}

fn item_ids(data: &[&Record], field: &str) -> Vec<i64> {
    data.iter()
        .filter_map(|r| r.get(field).and_then(Value::as_i64))
        .collect()
}

#[fixture]
fn tree() -> Tree {
    testing::init_test_setup();
    let input = records(json!([
        { "id": 1 },
        { "id": 2, "parentid": 1 },
        { "id": 3, "parentid": 1 },
        { "id": 4, "parentid": 1 },
        { "id": 5, "parentid": 2 },
        { "id": 6, "parentid": 2 },
        { "id": 7, "parentid": 3 },
        { "id": 8, "parentid": 4 },
        { "id": 9, "parentid": 2 },
        { "id": 10, "parentid": 6 },
        { "id": 11, "parentid": 6 },
    ]));
    build_trees(input, &TreeConfig::default())
        .expect("build forest")
        .remove(0)
}

#[fixture]
fn items() -> Vec<Record> {
    records(json!([
        { "itemid": 1, "referenceid": 4 },
        { "itemid": 2, "referenceid": 5 },
        { "itemid": 3, "referenceid": 1 },
        { "itemid": 4, "referenceid": 1 },
    ]))
}

#[fixture]
fn objects() -> Vec<Record> {
    records(json!([
        { "objectid": 1, "refid": 1 },
        { "objectid": 2, "refid": 5 },
    ]))
}

fn items_config() -> DataConfig {
    DataConfig::new("referenceid", "items").unwrap()
}

fn objects_config() -> DataConfig {
    DataConfig::new("refid", "objects").unwrap()
}

// ============================================================
// Attaching data
// ============================================================

#[rstest]
fn given_items_when_adding_data_then_lands_on_referenced_nodes(
    mut tree: Tree,
    items: Vec<Record>,
) {
    let attached = tree.add_data(&items, &items_config());
    assert_eq!(attached, 4);

    let root = tree.node_by_id(1).unwrap();
    let on_root: Vec<_> = root.collection("items").unwrap().iter().collect();
    assert_eq!(item_ids(&on_root, "itemid"), vec![3, 4]);
    assert_eq!(tree.node_by_id(4).unwrap().collection("items").unwrap().len(), 1);
    assert_eq!(tree.node_by_id(5).unwrap().collection("items").unwrap().len(), 1);
}

#[rstest]
#[case(2)]
#[case(3)]
#[case(6)]
#[case(11)]
fn given_items_when_adding_data_then_unreferenced_nodes_have_no_collection(
    mut tree: Tree,
    items: Vec<Record>,
    #[case] id: i64,
) {
    tree.add_data(&items, &items_config());
    let node = tree.node_by_id(id).unwrap();
    assert!(node.collection("items").is_none());
    assert!(node.single_node_data().is_empty());
}

#[rstest]
fn given_unknown_reference_when_adding_data_then_record_is_skipped(mut tree: Tree) {
    let data = records(json!([
        { "referenceid": 99 },
        { "referenceid": "1" },
        { "other": 1 },
        { "referenceid": 7 },
    ]));

    assert_eq!(tree.add_data(&data, &items_config()), 1);
    let attached: usize = tree.iter().map(|n| n.single_node_data().len()).sum();
    assert_eq!(attached, 1);
}

#[rstest]
fn given_two_calls_when_adding_data_then_collections_grow(mut tree: Tree, items: Vec<Record>) {
    tree.add_data(&items, &items_config());
    tree.add_data(&items, &items_config());

    let on_root: Vec<_> = tree.root().collection("items").unwrap().iter().collect();
    assert_eq!(item_ids(&on_root, "itemid"), vec![3, 4, 3, 4]);
}

#[rstest]
fn given_two_collections_when_reading_then_single_data_spans_both(
    mut tree: Tree,
    items: Vec<Record>,
    objects: Vec<Record>,
) {
    tree.add_data(&items, &items_config());
    tree.add_data(&objects, &objects_config());

    let root = tree.node_by_id(1).unwrap();
    assert_eq!(root.single_node_data().len(), 3);
    assert_eq!(root.collection_names().collect::<Vec<_>>(), vec!["items", "objects"]);
    assert_eq!(root.recursive_node_data().len(), 6);
}

#[rstest]
fn given_data_when_reading_recursively_then_subtree_is_pre_order(
    mut tree: Tree,
    items: Vec<Record>,
) {
    tree.add_data(&items, &items_config());

    // pre-order: 1 (items 3, 4), 2, 5 (item 2), ..., 4 (item 1)
    let all = tree.root().recursive_node_data();
    assert_eq!(item_ids(&all, "itemid"), vec![3, 4, 2, 1]);

    let branch = tree.node_by_id(2).unwrap().recursive_node_data();
    assert_eq!(item_ids(&branch, "itemid"), vec![2]);
}

#[rstest]
fn given_data_when_reading_leaves_then_single_equals_recursive(
    mut tree: Tree,
    items: Vec<Record>,
    objects: Vec<Record>,
) {
    tree.add_data(&items, &items_config());
    tree.add_data(&objects, &objects_config());

    for leaf in tree.leaves() {
        assert_eq!(leaf.single_node_data(), leaf.recursive_node_data());
    }
}

#[rstest]
fn given_data_when_reading_recursively_then_includes_own_data(
    mut tree: Tree,
    items: Vec<Record>,
) {
    tree.add_data(&items, &items_config());

    for node in tree.iter() {
        let single = node.single_node_data();
        let recursive = node.recursive_node_data();
        assert!(recursive.len() >= single.len());
        assert_eq!(&recursive[..single.len()], &single[..]);
    }
}

// ============================================================
// Argument checks
// ============================================================

#[rstest]
fn given_no_records_when_attaching_then_missing_argument(mut tree: Tree) {
    let result = tree.attach().config(items_config()).apply();
    assert_eq!(result.unwrap_err(), TreeError::MissingArgument("records"));
}

#[rstest]
fn given_no_config_when_attaching_then_missing_argument(mut tree: Tree, items: Vec<Record>) {
    let result = tree.attach().records(&items).apply();
    assert_eq!(result.unwrap_err(), TreeError::MissingArgument("config"));
}

#[rstest]
fn given_blank_collection_when_attaching_then_invalid_config(
    mut tree: Tree,
    items: Vec<Record>,
) {
    let result = tree
        .attach()
        .records(&items)
        .config(RawDataConfig {
            reference_id: Some("referenceid".into()),
            collection_name: Some(" ".into()),
        })
        .apply();
    assert_eq!(result.unwrap_err(), TreeError::InvalidConfig("collectionname"));
    assert!(tree.root().single_node_data().is_empty());
}

#[rstest]
fn given_complete_arguments_when_attaching_then_applies(mut tree: Tree, items: Vec<Record>) {
    let attached = tree
        .attach()
        .records(&items)
        .config(items_config())
        .apply()
        .unwrap();
    assert_eq!(attached, 4);
}

// ============================================================
// Queries
// ============================================================

#[rstest]
fn given_tree_when_looking_up_ids_then_finds_members_only(tree: Tree) {
    assert_eq!(tree.node_by_id(10).unwrap().id(), &RecordId::Int(10));
    assert!(tree.node_by_id(12).is_none());
    assert!(tree.node_by_id("10").is_none());
    assert!(tree.contains(&RecordId::Int(11)));
}

#[rstest]
fn given_tree_when_iterating_then_visits_pre_order(tree: Tree) {
    let order: Vec<String> = tree.iter().map(|n| n.id().to_string()).collect();
    assert_eq!(
        order,
        vec!["1", "2", "5", "6", "10", "11", "9", "3", "7", "4", "8"]
    );
    assert_eq!(tree.node_count(), 11);
    assert_eq!(tree.depth(), 4);
}

#[rstest]
fn given_tree_when_iterating_postorder_then_root_comes_last(tree: Tree) {
    let order: Vec<String> = tree.iter_postorder().map(|n| n.id().to_string()).collect();
    assert_eq!(order.first().map(String::as_str), Some("5"));
    assert_eq!(order.last().map(String::as_str), Some("1"));
    assert_eq!(order.len(), 11);
}

#[rstest]
fn given_tree_when_listing_leaves_then_returns_childless_nodes(tree: Tree) {
    let leaves: Vec<String> = tree.leaves().iter().map(|n| n.id().to_string()).collect();
    assert_eq!(leaves, vec!["5", "10", "11", "9", "7", "8"]);
}

#[rstest]
fn given_node_when_walking_up_then_reaches_root(tree: Tree) {
    let mut node = tree.node_by_id(11).unwrap();
    let mut path = vec![node.id().to_string()];
    while let Some(parent) = node.parent() {
        path.push(parent.id().to_string());
        node = parent;
    }
    assert_eq!(path, vec!["11", "6", "2", "1"]);
    assert!(node.is_root());
    assert_eq!(node, tree.root());
}

// ============================================================
// Forest helpers
// ============================================================

#[test]
fn given_forest_when_adding_data_then_each_tree_takes_its_own() {
    testing::init_test_setup();
    let mut trees = build_trees(
        records(json!([
            { "id": 1 },
            { "id": 2, "parentid": 1 },
            { "id": 12 },
            { "id": 13, "parentid": 12 },
        ])),
        &TreeConfig::default(),
    )
    .unwrap();
    let data = records(json!([
        { "referenceid": 2 },
        { "referenceid": 13 },
        { "referenceid": 13 },
        { "referenceid": 42 },
    ]));

    assert_eq!(add_data_to_forest(&mut trees, &data, &items_config()), 3);
    assert_eq!(trees[0].root().recursive_node_data().len(), 1);
    assert_eq!(trees[1].root().recursive_node_data().len(), 2);

    let node = find_node(&trees, &RecordId::Int(13)).unwrap();
    assert_eq!(node.single_node_data().len(), 2);
    assert_eq!(node.parent().map(|p| p.id().clone()), Some(RecordId::Int(12)));
    assert!(find_node(&trees, &RecordId::Int(42)).is_none());
}

#[rstest]
fn given_node_when_walking_subtree_postorder_then_ends_at_node(tree: Tree) {
    let order: Vec<String> = tree
        .node_by_id(2)
        .unwrap()
        .subtree_postorder()
        .map(|n| n.id().to_string())
        .collect();
    assert_eq!(order, vec!["5", "10", "11", "6", "9", "2"]);
}
