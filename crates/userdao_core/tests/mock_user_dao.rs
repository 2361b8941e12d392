use userdao_core::{DataAccessError, Level, MockUserDao, User, UserDao, UserService};

fn users() -> Vec<User> {
    vec![
        User::new("bumjin", "박범진", "p1", "user1@ksug.org", Level::Basic, 49, 0),
        User::new("joytouch", "강명성", "p2", "user2@ksug.org", Level::Basic, 50, 0),
        User::new("erwins", "신승한", "p3", "user3@ksug.org", Level::Silver, 60, 29),
        User::new("madnite1", "이상호", "p4", "user4@ksug.org", Level::Silver, 60, 30),
        User::new("green", "오민규", "p5", "user5@ksug.org", Level::Gold, 100, 100),
    ]
}

#[test]
fn get_all_serves_the_given_sequence_in_order() {
    let given = users();
    let dao = MockUserDao::new(given.clone());
    assert_eq!(dao.get_all().unwrap(), given);
}

#[test]
fn update_is_recorded_not_applied() {
    let given = users();
    let dao = MockUserDao::new(vec![given[0].clone(), given[1].clone()]);

    let mut changed = given[0].clone();
    changed.name = "renamed".to_string();
    dao.update(&changed).unwrap();

    assert_eq!(dao.updated(), vec![changed]);
    assert_eq!(dao.get_all().unwrap()[0], given[0]);
}

#[test]
fn unsupported_operations_fail_loudly() {
    let given = users();
    let user = &given[0];
    let dao = MockUserDao::new(given.clone());

    assert!(matches!(
        dao.add(user),
        Err(DataAccessError::UnsupportedOperation("add"))
    ));
    assert!(matches!(
        dao.get("bumjin"),
        Err(DataAccessError::UnsupportedOperation("get"))
    ));
    assert!(matches!(
        dao.delete_all(),
        Err(DataAccessError::UnsupportedOperation("delete_all"))
    ));
    assert!(matches!(
        dao.get_count(),
        Err(DataAccessError::UnsupportedOperation("get_count"))
    ));
    assert!(dao.updated().is_empty());
}

#[test]
fn upgrade_levels_updates_only_eligible_users_in_order() {
    let service = UserService::new(MockUserDao::new(users()));

    assert_eq!(service.upgrade_levels().unwrap(), 2);

    let updated = service.dao().updated();
    let summary: Vec<_> = updated
        .iter()
        .map(|user| (user.id.as_str(), user.level))
        .collect();
    assert_eq!(
        summary,
        vec![("joytouch", Level::Silver), ("madnite1", Level::Gold)]
    );
    assert_eq!(updated[0].login, 50);
    assert_eq!(updated[1].recommend, 30);
}

#[test]
fn add_if_absent_propagates_non_duplicate_failures() {
    let service = UserService::new(MockUserDao::new(Vec::new()));
    let err = service.add_if_absent(&users()[0]).unwrap_err();
    assert!(matches!(err, DataAccessError::UnsupportedOperation("add")));
}
