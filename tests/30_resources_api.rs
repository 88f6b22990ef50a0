mod common;

use anyhow::Result;
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};

use common::{created_id, unique_email, TestServer};
use thesis_tracker::resources::{self, ResourceSpec};

const MISSING_ID: i64 = 999_999_999;

/// Columns that point at another row
const REFERENCE_COLUMNS: &[&str] = &["plan_id", "student_id", "advisor_id", "user_id", "reviewer_id", "section_id"];

/// Rows every resource can hang off
struct Parents {
    user: i64,
    plan: i64,
    section: i64,
}

impl Parents {
    async fn create(client: &Client, server: &TestServer) -> Result<Self> {
        let user = create_user(client, server, "parent").await?;
        let plan = create_plan(client, server, user, "Plan base").await?;
        let res = client
            .post(server.url("/api/sections"))
            .json(&json!({ "plan_id": plan, "type": "introduction" }))
            .send()
            .await?;
        assert_eq!(res.status(), StatusCode::CREATED);
        let section = created_id(&res.json::<Value>().await?)?;
        Ok(Self { user, plan, section })
    }
}

/// Required fields plus every reference column; optional fields are left out so
/// their defaults show up on read.
fn valid_payload(spec: &ResourceSpec, parents: &Parents) -> serde_json::Map<String, Value> {
    let mut payload = serde_json::Map::new();
    for column in spec.columns {
        let value = match column.name {
            "plan_id" => json!(parents.plan),
            "student_id" | "user_id" | "reviewer_id" | "advisor_id" => json!(parents.user),
            "section_id" => json!(parents.section),
            "email" => json!(unique_email(spec.path)),
            name if column.required => json!(format!("{} de prueba", name)),
            _ => continue,
        };
        payload.insert(column.name.to_string(), value);
    }
    payload
}

async fn create_user(client: &Client, server: &TestServer, name: &str) -> Result<i64> {
    let res = client
        .post(server.url("/api/users"))
        .json(&json!({ "name": name, "email": unique_email(name), "password": "secret" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);
    created_id(&res.json::<Value>().await?)
}

async fn create_plan(client: &Client, server: &TestServer, student_id: i64, title: &str) -> Result<i64> {
    let res = client
        .post(server.url("/api/research-plans"))
        .json(&json!({ "student_id": student_id, "title": title }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);
    created_id(&res.json::<Value>().await?)
}

#[tokio::test]
async fn user_create_then_fetch_applies_defaults() -> Result<()> {
    let Some(server) = common::ensure_server().await? else { return Ok(()) };
    let client = Client::new();

    let email = unique_email("ana");
    let res = client
        .post(server.url("/api/users"))
        .json(&json!({ "name": "Ana", "email": email, "password": "secret" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);
    let body = res.json::<Value>().await?;
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["message"], json!("Usuario creado exitosamente"));
    let id = created_id(&body)?;

    let res = client.get(server.url(&format!("/api/users/{}", id))).send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    let user = res.json::<Value>().await?["data"].clone();
    assert_eq!(user["name"], json!("Ana"));
    assert_eq!(user["email"], json!(email));
    assert_eq!(user["role"], json!("student"));
    assert_eq!(user["status"], json!("active"));
    assert!(user.get("password").is_none());
    assert_ne!(user["password_hash"], json!("secret"));
    assert_eq!(user["password_hash"].as_str().map(str::len), Some(64));

    Ok(())
}

#[tokio::test]
async fn duplicate_email_is_a_conflict() -> Result<()> {
    let Some(server) = common::ensure_server().await? else { return Ok(()) };
    let client = Client::new();

    let payload = json!({ "name": "Luis", "email": unique_email("luis"), "password_hash": "h" });
    let first = client.post(server.url("/api/users")).json(&payload).send().await?;
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = client.post(server.url("/api/users")).json(&payload).send().await?;
    assert_eq!(second.status(), StatusCode::CONFLICT);
    assert_eq!(
        second.json::<Value>().await?,
        json!({ "success": false, "error": "El email ya está registrado" })
    );

    Ok(())
}

#[tokio::test]
async fn missing_plan_is_not_found() -> Result<()> {
    let Some(server) = common::ensure_server().await? else { return Ok(()) };
    let client = Client::new();

    let res = client.get(server.url("/api/research-plans/999999999")).send().await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body = res.json::<Value>().await?;
    assert_eq!(body, json!({ "success": false, "error": "Plan de investigación no encontrado" }));
    assert!(body.get("data").is_none());

    Ok(())
}

#[tokio::test]
async fn child_of_missing_plan_is_rejected() -> Result<()> {
    let Some(server) = common::ensure_server().await? else { return Ok(()) };
    let client = Client::new();

    let res = client
        .post(server.url("/api/sections"))
        .json(&json!({ "plan_id": 999999999, "type": "intro" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        res.json::<Value>().await?["error"],
        json!("El plan de investigación especificado no existe")
    );

    Ok(())
}

#[tokio::test]
async fn plan_update_and_delete_lifecycle() -> Result<()> {
    let Some(server) = common::ensure_server().await? else { return Ok(()) };
    let client = Client::new();

    let student = create_user(&client, server, "sofia").await?;
    let plan = create_plan(&client, server, student, "Energías renovables").await?;
    let plan_url = server.url(&format!("/api/research-plans/{}", plan));

    let created = client.get(&plan_url).send().await?.json::<Value>().await?["data"].clone();
    assert_eq!(created["title"], json!("Energías renovables"));
    assert_eq!(created["status"], json!("draft"));
    assert_eq!(created["progress"].as_f64(), Some(0.0));
    assert_eq!(created["advisor_id"], Value::Null);
    assert_eq!(created["student_name"], json!("sofia"));

    let res = client
        .put(&plan_url)
        .json(&json!({
            "student_id": student,
            "title": "Energía solar en zonas rurales",
            "status": "in_progress",
            "progress": 45.5
        }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(
        res.json::<Value>().await?,
        json!({ "success": true, "message": "Plan de investigación actualizado exitosamente" })
    );

    let updated = client.get(&plan_url).send().await?.json::<Value>().await?["data"].clone();
    assert_eq!(updated["title"], json!("Energía solar en zonas rurales"));
    assert_eq!(updated["status"], json!("in_progress"));
    assert_eq!(updated["progress"].as_f64(), Some(45.5));

    let res = client.delete(&plan_url).send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(
        res.json::<Value>().await?["message"],
        json!("Plan de investigación eliminado exitosamente")
    );

    let res = client.get(&plan_url).send().await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = client.delete(&plan_url).send().await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    Ok(())
}

#[tokio::test]
async fn update_of_missing_row_is_not_found() -> Result<()> {
    let Some(server) = common::ensure_server().await? else { return Ok(()) };
    let client = Client::new();

    let res = client
        .put(server.url("/api/users/999999999"))
        .json(&json!({ "name": "X", "email": unique_email("x"), "password_hash": "h" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(res.json::<Value>().await?["error"], json!("Usuario no encontrado"));

    Ok(())
}

#[tokio::test]
async fn progress_outside_range_is_rejected() -> Result<()> {
    let Some(server) = common::ensure_server().await? else { return Ok(()) };
    let client = Client::new();

    let student = create_user(&client, server, "marco").await?;
    let res = client
        .post(server.url("/api/research-plans"))
        .json(&json!({ "student_id": student, "title": "Fuera de rango", "progress": 150 }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(res.json::<Value>().await?["success"], json!(false));

    Ok(())
}

#[tokio::test]
async fn sections_listed_by_plan() -> Result<()> {
    let Some(server) = common::ensure_server().await? else { return Ok(()) };
    let client = Client::new();

    let student = create_user(&client, server, "elena").await?;
    let plan = create_plan(&client, server, student, "Biodiversidad urbana").await?;

    for section_type in ["introduction", "methodology"] {
        let res = client
            .post(server.url("/api/sections"))
            .json(&json!({ "plan_id": plan, "type": section_type, "content": "..." }))
            .send()
            .await?;
        assert_eq!(res.status(), StatusCode::CREATED);
    }

    let res = client.get(server.url(&format!("/api/sections/plan/{}", plan))).send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    let rows = res.json::<Value>().await?["data"].as_array().cloned().unwrap_or_default();
    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|row| row["plan_title"] == json!("Biodiversidad urbana")));
    assert!(rows.iter().all(|row| row["status"] == json!("pending")));

    let res = client.get(server.url("/api/sections/plan/999999999")).send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.json::<Value>().await?, json!({ "success": true, "data": [] }));

    Ok(())
}

#[tokio::test]
async fn plan_history_is_newest_first() -> Result<()> {
    let Some(server) = common::ensure_server().await? else { return Ok(()) };
    let client = Client::new();

    let student = create_user(&client, server, "pablo").await?;
    let plan = create_plan(&client, server, student, "Historia").await?;

    for action in ["created", "submitted"] {
        let res = client
            .post(server.url("/api/plan-history"))
            .json(&json!({ "plan_id": plan, "user_id": student, "action": action }))
            .send()
            .await?;
        assert_eq!(res.status(), StatusCode::CREATED);
    }

    let res = client.get(server.url(&format!("/api/plan-history/plan/{}", plan))).send().await?;
    let rows = res.json::<Value>().await?["data"].as_array().cloned().unwrap_or_default();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["action"], json!("submitted"));
    assert_eq!(rows[0]["user_name"], json!("pablo"));
    assert_eq!(rows[1]["action"], json!("created"));

    Ok(())
}

#[tokio::test]
async fn activity_dates_and_defaults() -> Result<()> {
    let Some(server) = common::ensure_server().await? else { return Ok(()) };
    let client = Client::new();

    let student = create_user(&client, server, "irene").await?;
    let plan = create_plan(&client, server, student, "Cronograma").await?;

    let res = client
        .post(server.url("/api/activities"))
        .json(&json!({
            "plan_id": plan,
            "activity_name": "Revisión de literatura",
            "start_date": "2024-03-01",
            "end_date": "2024-04-15"
        }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);
    let id = created_id(&res.json::<Value>().await?)?;

    let activity = client
        .get(server.url(&format!("/api/activities/{}", id)))
        .send()
        .await?
        .json::<Value>()
        .await?["data"]
        .clone();
    assert_eq!(activity["start_date"], json!("2024-03-01"));
    assert_eq!(activity["end_date"], json!("2024-04-15"));
    assert_eq!(activity["status"], json!("pending"));
    assert_eq!(activity["progress"].as_f64(), Some(0.0));
    assert_eq!(activity["description"], Value::Null);

    Ok(())
}

#[tokio::test]
async fn deleting_a_plan_removes_its_children() -> Result<()> {
    let Some(server) = common::ensure_server().await? else { return Ok(()) };
    let client = Client::new();

    let student = create_user(&client, server, "tomas").await?;
    let plan = create_plan(&client, server, student, "Temporal").await?;

    let res = client
        .post(server.url("/api/bibliography"))
        .json(&json!({ "plan_id": plan, "citation": "Knuth, D. (1997). TAOCP." }))
        .send()
        .await?;
    let entry = created_id(&res.json::<Value>().await?)?;

    let res = client.delete(server.url(&format!("/api/research-plans/{}", plan))).send().await?;
    assert_eq!(res.status(), StatusCode::OK);

    let res = client.get(server.url(&format!("/api/bibliography/{}", entry))).send().await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        res.json::<Value>().await?["error"],
        json!("Entrada de bibliografía no encontrada")
    );

    Ok(())
}

#[tokio::test]
async fn every_resource_round_trips() -> Result<()> {
    let Some(server) = common::ensure_server().await? else { return Ok(()) };
    let client = Client::new();
    let parents = Parents::create(&client, server).await?;

    for spec in resources::ALL.iter().copied() {
        let payload = valid_payload(spec, &parents);
        let collection = server.url(&format!("/api/{}", spec.path));

        let res = client.post(&collection).json(&payload).send().await?;
        assert_eq!(res.status(), StatusCode::CREATED, "create {}", spec.path);
        let body = res.json::<Value>().await?;
        assert_eq!(body["message"], json!(spec.messages.created), "{}", spec.path);
        let record_url = format!("{}/{}", collection, created_id(&body)?);

        let res = client.get(&record_url).send().await?;
        assert_eq!(res.status(), StatusCode::OK, "get {}", spec.path);
        let row = res.json::<Value>().await?["data"].clone();
        for column in spec.columns {
            let expected = match payload.get(column.name) {
                Some(value) => value.clone(),
                None => column.default.map(|d| d.to_value()).unwrap_or(Value::Null),
            };
            let actual = &row[column.name];
            if expected.is_number() {
                assert_eq!(actual.as_f64(), expected.as_f64(), "{}.{}", spec.path, column.name);
            } else {
                assert_eq!(actual, &expected, "{}.{}", spec.path, column.name);
            }
        }

        let res = client.delete(&record_url).send().await?;
        assert_eq!(res.status(), StatusCode::OK, "delete {}", spec.path);
        assert_eq!(res.json::<Value>().await?["message"], json!(spec.messages.deleted));

        let res = client.get(&record_url).send().await?;
        assert_eq!(res.status(), StatusCode::NOT_FOUND, "get deleted {}", spec.path);
        assert_eq!(
            res.json::<Value>().await?,
            json!({ "success": false, "error": spec.messages.not_found })
        );

        let res = client.delete(&record_url).send().await?;
        assert_eq!(res.status(), StatusCode::NOT_FOUND, "delete twice {}", spec.path);
    }

    Ok(())
}

#[tokio::test]
async fn every_missing_parent_is_rejected() -> Result<()> {
    let Some(server) = common::ensure_server().await? else { return Ok(()) };
    let client = Client::new();
    let parents = Parents::create(&client, server).await?;

    for spec in resources::ALL.iter().copied() {
        let references = spec.columns.iter().filter(|c| REFERENCE_COLUMNS.contains(&c.name));
        for column in references {
            let mut payload = valid_payload(spec, &parents);
            payload.insert(column.name.to_string(), json!(MISSING_ID));

            let res = client
                .post(server.url(&format!("/api/{}", spec.path)))
                .json(&payload)
                .send()
                .await?;
            assert_eq!(res.status(), StatusCode::BAD_REQUEST, "{}.{}", spec.path, column.name);
            assert_eq!(
                res.json::<Value>().await?,
                json!({ "success": false, "error": spec.messages.missing_reference }),
                "{}.{}",
                spec.path,
                column.name
            );
        }
    }

    Ok(())
}

#[tokio::test]
async fn empty_status_takes_the_plan_default() -> Result<()> {
    let Some(server) = common::ensure_server().await? else { return Ok(()) };
    let client = Client::new();

    let student = create_user(&client, server, "nadia").await?;
    let res = client
        .post(server.url("/api/research-plans"))
        .json(&json!({ "student_id": student, "title": "Vacío", "status": "", "progress": 0 }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);
    let id = created_id(&res.json::<Value>().await?)?;

    let plan = client
        .get(server.url(&format!("/api/research-plans/{}", id)))
        .send()
        .await?
        .json::<Value>()
        .await?["data"]
        .clone();
    assert_eq!(plan["status"], json!("draft"));
    assert_eq!(plan["progress"].as_f64(), Some(0.0));

    Ok(())
}
