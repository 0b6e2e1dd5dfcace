mod init;

use crate::init::{init, init_logs};
use dal::{Failure, Record, Value};
use dal_mysql::{Model, ModelConfig, PoolManager};
use std::sync::Arc;
use time::macros::datetime;

#[derive(Record, Debug, Clone, PartialEq)]
struct User {
    id: i32,
    name: String,
}

#[derive(Record, Debug, Clone, PartialEq, Default)]
struct Being {
    #[dal(name = "Name")]
    name: String,
    #[dal(name = "Age")]
    age: u8,
}

#[derive(Record, Debug, Clone, PartialEq)]
struct Person {
    id: i64,
    #[dal(flatten)]
    being: Being,
    email: Option<String>,
}

#[derive(Record, Debug, Clone, PartialEq)]
struct Event {
    id: i32,
    created: time::PrimitiveDateTime,
}

async fn users(model: &mut Model) {
    model
        .exec_raw("drop table if exists user")
        .await
        .expect("Failed to drop the user table");
    model
        .exec_raw("create table user(id int primary key, name varchar(64))")
        .await
        .expect("Failed to create the user table");

    let written = vec![
        User {
            id: 1,
            name: "a".into(),
        },
        User {
            id: 2,
            name: "b".into(),
        },
    ];
    let affected = model
        .update("user", &written)
        .await
        .expect("Failed to update the users");
    assert_eq!(affected, 2);

    model
        .read::<User>("user", &["id", "name"], "order by id")
        .await
        .expect("Failed to read the users");
    assert_eq!(model.records::<User>(), Some(written.as_slice()));
    assert_eq!(model.rows().len(), 2);
    assert_eq!(model.records::<Person>(), None);

    // Reading again replaces the result with the same records
    model
        .read::<User>("user", &["id", "name"], "order by id")
        .await
        .expect("Failed to read the users again");
    assert_eq!(model.records::<User>(), Some(written.as_slice()));

    // Insert ignore keeps the first value
    let affected = model
        .create(
            "user",
            &[User {
                id: 1,
                name: "z".into(),
            }],
        )
        .await
        .expect("Failed to create a conflicting user");
    assert_eq!(affected, 0);
    model
        .read::<User>("user", &["id", "name"], "where id = 1")
        .await
        .expect("Failed to read user 1");
    assert_eq!(model.records::<User>().unwrap()[0].name, "a");

    // Insert or update stores the second value
    model
        .update(
            "user",
            &[User {
                id: 1,
                name: "z".into(),
            }],
        )
        .await
        .expect("Failed to update a conflicting user");
    model
        .read::<User>("user", &["id", "name"], "where id = 1")
        .await
        .expect("Failed to read user 1");
    let records = model.take_records::<User>().expect("Records should be users");
    assert_eq!(
        records,
        [User {
            id: 1,
            name: "z".into(),
        }]
    );
    assert!(model.records::<User>().is_none());

    // Empty input
    let error = silent_logs! { model.create::<User>("user", &[]).await }
        .expect_err("Nothing to create");
    assert_eq!(Failure::of(&error), Some(Failure::InputShape));

    // Columns not matching the record skip every row
    silent_logs!(model.read::<User>("user", &["id"], "").await).expect("The query itself is valid");
    assert_eq!(model.records::<User>().map(<[User]>::len), Some(0));

    // A failing query keeps the previous result
    model
        .read::<User>("user", &["id", "name"], "")
        .await
        .expect("Failed to read the users");
    let error = silent_logs! { model.read::<User>("missing_table", &["id", "name"], "").await }
        .expect_err("The table does not exist");
    assert!(Failure::of(&error).is_some());
    assert_eq!(model.records::<User>().map(<[User]>::len), Some(2));
}

async fn chunks(model: &mut Model) {
    model
        .exec_raw("drop table if exists chunked")
        .await
        .expect("Failed to drop the chunked table");
    model
        .exec_raw("create table chunked(id int primary key, name varchar(64))")
        .await
        .expect("Failed to create the chunked table");
    let config = model.config().clone();
    model.configure(config.driver.clone(), config.data_source.clone(), 2);
    let records: Vec<_> = (0..5)
        .map(|i| User {
            id: i,
            name: format!("user {i}"),
        })
        .collect();
    let affected = model
        .create("chunked", &records)
        .await
        .expect("Failed to create 5 users in chunks of 2");
    assert_eq!(affected, 5);

    // A failing chunk leaves the table untouched
    let mut broken = records.clone();
    broken.extend([
        User {
            id: 10,
            name: "fits".into(),
        },
        User {
            id: 11,
            name: "x".repeat(100),
        },
    ]);
    let error = silent_logs! { model.update("chunked", &broken).await }
        .expect_err("The last chunk holds a name too long for the column");
    assert_eq!(Failure::of(&error), Some(Failure::Execution));
    model
        .read::<User>("chunked", &["id", "name"], "where id >= 10")
        .await
        .expect("Failed to read the chunked users");
    assert_eq!(model.records::<User>().map(<[User]>::len), Some(0));
    model.configure(config.driver, config.data_source, config.batch_size);
}

async fn nested(model: &mut Model) {
    model
        .exec_raw("drop table if exists person")
        .await
        .expect("Failed to drop the person table");
    model
        .exec_raw(
            "create table person(id bigint primary key, Name varchar(64), Age tinyint unsigned, email varchar(64) null)",
        )
        .await
        .expect("Failed to create the person table");
    let people = vec![
        Person {
            id: 1,
            being: Being {
                name: "Ada".into(),
                age: 36,
            },
            email: Some("ada@example.com".into()),
        },
        Person {
            id: 2,
            being: Being {
                name: "Alan".into(),
                age: 41,
            },
            email: None,
        },
    ];
    model
        .update("person", &people)
        .await
        .expect("Failed to update the people");
    model
        .read::<Person>("person", &["id", "Name", "Age", "email"], "order by id")
        .await
        .expect("Failed to read the people");
    assert_eq!(model.records::<Person>(), Some(people.as_slice()));
    assert_eq!(model.rows()[1][3], Value::Null);
}

async fn cleanup(model: &mut Model) {
    model
        .exec_raw("drop table if exists event")
        .await
        .expect("Failed to drop the event table");
    model
        .exec_raw("create table event(id int primary key, created datetime)")
        .await
        .expect("Failed to create the event table");
    model
        .create(
            "event",
            &[
                Event {
                    id: 1,
                    created: datetime!(2024-01-01 10:00),
                },
                Event {
                    id: 2,
                    created: datetime!(2024-03-01 10:00),
                },
                Event {
                    id: 3,
                    created: datetime!(2025-01-01 10:00),
                },
            ],
        )
        .await
        .expect("Failed to create the events");
    let removed = model
        .cleanup("event", "created", datetime!(2024-06-01 0:00))
        .await
        .expect("Failed to cleanup the events");
    assert_eq!(removed, 2);
    model
        .read::<Event>("event", &["id", "created"], "")
        .await
        .expect("Failed to read the events");
    assert_eq!(
        model.records::<Event>(),
        Some(
            [Event {
                id: 3,
                created: datetime!(2025-01-01 10:00),
            }]
            .as_slice()
        )
    );
}

async fn info(model: &Model) {
    let info = model.info().await.expect("Failed to read the version");
    assert_eq!(info.len(), 1);
    assert!(info[0].starts_with("system db version: "), "{}", info[0]);
}

#[tokio::test]
async fn mysql() {
    init_logs();
    let Some((url, _container)) = init().await else {
        return;
    };
    let pools = Arc::new(PoolManager::new());
    let mut model = Model::new(pools.clone(), ModelConfig::new("mysql", url.clone()));
    users(&mut model).await;
    chunks(&mut model).await;
    nested(&mut model).await;
    cleanup(&mut model).await;
    info(&model).await;

    let other = Model::new(pools.clone(), ModelConfig::new("mysql", url));
    info(&other).await;
    assert_eq!(pools.len(), 1);
    pools
        .disconnect_all()
        .await
        .expect("Failed to disconnect the pools");
    assert!(pools.is_empty());
}

#[tokio::test]
async fn empty_data_source() {
    init_logs();
    let model = Model::new(Arc::new(PoolManager::new()), ModelConfig::default());
    let error = silent_logs! { model.info().await }.expect_err("There is no data source");
    assert_eq!(Failure::of(&error), Some(Failure::Configuration));
}

#[tokio::test]
#[should_panic(expected = "unsupported driver")]
async fn unknown_driver() {
    let model = Model::new(
        Arc::new(PoolManager::new()),
        ModelConfig::new("sqlite", "sqlite://memory"),
    );
    let _ = model
        .create(
            "user",
            &[User {
                id: 1,
                name: "a".into(),
            }],
        )
        .await;
}
