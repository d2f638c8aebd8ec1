use super::*;

fn named(name: &str) -> ParentRef {
    ParentRef::Named(name.into())
}

fn root(name: &str) -> ParentRef {
    ParentRef::Root(name.into())
}

#[test]
fn find_folder_returns_first_preorder_match() {
    let mut tree = WorkspaceTree::new();
    tree.create_root_folder("a").unwrap();
    tree.create_root_folder("b").unwrap();
    tree.create_folder(&named("a"), "shared").unwrap();
    tree.create_folder(&named("b"), "shared").unwrap();
    tree.create_file(&root("b"), "marker.txt", String::new())
        .unwrap();

    tree.create_file(&named("shared"), "first.txt", String::new())
        .unwrap();

    let a_shared = &tree.find_root("a").unwrap().folders()[0];
    let b_shared = &tree.find_root("b").unwrap().folders()[0];
    assert_eq!(a_shared.files().len(), 1);
    assert!(b_shared.files().is_empty());
}

#[test]
fn create_folder_under_missing_parent_is_a_noop() {
    let mut tree = WorkspaceTree::new();
    tree.create_root_folder("a").unwrap();

    let err = tree.create_folder(&named("missing"), "x").unwrap_err();
    assert_eq!(err, WorkspaceError::ParentNotFound("missing".into()));
    assert_eq!(tree.list_roots().len(), 1);
    assert!(tree.list_roots()[0].is_empty());
}

#[test]
fn root_lookup_ignores_nested_folders() {
    let mut tree = WorkspaceTree::new();
    tree.create_root_folder("a").unwrap();
    tree.create_folder(&named("a"), "nested").unwrap();

    let err = tree
        .create_file(&root("nested"), "x.txt", String::new())
        .unwrap_err();
    assert_eq!(err, WorkspaceError::ParentNotFound("nested".into()));

    tree.create_file(&named("nested"), "x.txt", String::new())
        .unwrap();
    assert!(tree.find_file_by_name("x.txt").is_some());
}

#[test]
fn sibling_names_are_unique_across_files_and_folders() {
    let mut tree = WorkspaceTree::new();
    tree.create_root_folder("a").unwrap();
    tree.create_file(&named("a"), "dup", String::new()).unwrap();

    assert_eq!(
        tree.create_folder(&named("a"), "dup"),
        Err(WorkspaceError::NameExists("dup".into()))
    );
    assert_eq!(
        tree.create_root_folder("a"),
        Err(WorkspaceError::NameExists("a".into()))
    );
}

#[test]
fn invalid_names_are_rejected() {
    let mut tree = WorkspaceTree::new();
    for bad in ["", "a b", "a/b"] {
        assert_eq!(
            tree.create_root_folder(bad),
            Err(WorkspaceError::InvalidName(bad.into()))
        );
    }
    assert!(tree.list_roots().is_empty());
}

#[test]
fn files_created_back_to_back_get_distinct_ids() {
    let mut tree = WorkspaceTree::new();
    tree.create_root_folder("a").unwrap();
    let first = tree.create_file(&named("a"), "x", String::new()).unwrap();
    let second = tree.create_file(&named("a"), "y", String::new()).unwrap();
    assert_ne!(first, second);
    assert!(tree.validate().is_ok());
}

#[test]
fn update_file_content_touches_only_the_target() {
    let mut tree = WorkspaceTree::new();
    tree.create_root_folder("a").unwrap();
    tree.create_root_folder("b").unwrap();
    let target = tree.create_file(&named("a"), "x", "old".to_string()).unwrap();
    let other = tree.create_file(&named("b"), "y", "keep".to_string()).unwrap();

    tree.update_file_content(target, "new".to_string()).unwrap();

    assert_eq!(tree.find_file(target).unwrap().content(), "new");
    assert_eq!(tree.find_file(other).unwrap().content(), "keep");
    assert_eq!(tree.list_roots().len(), 2);
}

#[test]
fn update_unknown_file_reports_file_not_found() {
    let mut tree = WorkspaceTree::new();
    let ghost: FileId = "file-99".parse().unwrap();
    assert_eq!(
        tree.update_file_content(ghost, String::new()),
        Err(WorkspaceError::FileNotFound("file-99".into()))
    );
}

#[test]
fn insert_templates_is_all_or_nothing() {
    let mut tree = WorkspaceTree::new();
    tree.create_root_folder("proj").unwrap();
    tree.create_folder(&named("proj"), "node_modules").unwrap();

    let templates = vec![
        FolderTemplate {
            name: "app".into(),
            files: vec![("index.js".into(), String::new())],
        },
        FolderTemplate::empty("node_modules"),
    ];
    let err = tree.insert_templates(&root("proj"), &templates).unwrap_err();
    assert_eq!(err, WorkspaceError::NameExists("node_modules".into()));

    let proj = tree.find_root("proj").unwrap();
    assert_eq!(proj.folders().len(), 1);
    assert!(tree.find_folder("app").is_none());
}

#[test]
fn remove_folder_drops_the_whole_subtree() {
    let mut tree = WorkspaceTree::new();
    tree.create_root_folder("a").unwrap();
    tree.create_folder(&named("a"), "inner").unwrap();
    let id = tree.create_file(&named("inner"), "x", String::new()).unwrap();

    let removed = tree.remove_folder("inner").unwrap();
    assert_eq!(removed.name(), "inner");
    assert!(tree.find_file(id).is_none());
    assert!(tree.find_folder("inner").is_none());
    assert_eq!(
        tree.remove_folder("inner"),
        Err(WorkspaceError::FolderNotFound("inner".into()))
    );
}

#[test]
fn remove_file_by_id() {
    let mut tree = WorkspaceTree::new();
    tree.create_root_folder("a").unwrap();
    let id = tree.create_file(&named("a"), "x", String::new()).unwrap();

    assert_eq!(tree.remove_file(id).unwrap().name(), "x");
    assert!(tree.find_root("a").unwrap().is_empty());
}

#[test]
fn validate_flags_duplicate_ids_in_hand_built_trees() {
    let id: FileId = "file-7".parse().unwrap();
    let folder = Folder {
        files: vec![File::new(id, "x", ""), File::new(id, "y", "")],
        ..Folder::new("a")
    };
    let mut tree = WorkspaceTree::from_roots(vec![folder]);

    assert_eq!(
        tree.validate(),
        Err(WorkspaceError::DuplicateFileId {
            folder: "a".into(),
            id,
        })
    );

    let fresh = tree.create_file(&named("a"), "z", String::new()).unwrap();
    assert!(fresh > id);
}

#[test]
fn flatten_for_view_respects_expansion() {
    let mut tree = WorkspaceTree::new();
    tree.create_root_folder("a").unwrap();
    tree.create_file(&named("a"), "readme", String::new()).unwrap();
    tree.create_folder(&named("a"), "sub").unwrap();
    tree.create_file(&named("sub"), "deep", String::new()).unwrap();

    let mut expanded = FxHashSet::default();
    let rows = tree.flatten_for_view(&expanded);
    assert_eq!(rows.len(), 1);
    assert!(!rows[0].is_expanded);

    expanded.insert(CompactString::from("a"));
    let rows = tree.flatten_for_view(&expanded);
    let names: Vec<&str> = rows.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["a", "sub", "readme"]);
    assert_eq!(rows[1].path, "a/sub");
    assert_eq!(rows[2].kind, NodeKind::File);

    expanded.insert(CompactString::from("a/sub"));
    let rows = tree.flatten_for_view(&expanded);
    let names: Vec<&str> = rows.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["a", "sub", "deep", "readme"]);
    assert_eq!(rows[2].depth, 2);
}
