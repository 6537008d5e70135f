// Store integration tests against in-memory SQLite databases. Each test
// opens its own store, so every case starts from an empty schema.

use staffdesk_cli::db::Store;

async fn empty_store() -> Store {
    Store::connect("sqlite::memory:")
        .await
        .expect("in-memory store should open")
}

#[tokio::test]
async fn add_department_assigns_unique_ids() {
    let store = empty_store().await;
    let first = store.add_department("Engineering").await.unwrap();
    let second = store.add_department("Sales").await.unwrap();
    assert_ne!(first, second);

    let rows = store.departments().await.unwrap();
    assert_eq!(rows.len(), 2);
    assert!(rows.iter().any(|d| d.id == first && d.name == "Engineering"));
    assert!(rows.iter().any(|d| d.id == second && d.name == "Sales"));
}

#[tokio::test]
async fn role_listing_joins_department_name() {
    let store = empty_store().await;
    let dept = store.add_department("Engineering").await.unwrap();
    store.add_role("Engineer", 60000.0, dept).await.unwrap();

    let rows = store.roles().await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].title, "Engineer");
    assert_eq!(rows[0].department, "Engineering");
    assert_eq!(rows[0].salary, 60000.0);
}

#[tokio::test]
async fn role_requires_existing_department() {
    let store = empty_store().await;
    let missing_department = 42;
    assert!(store
        .add_role("Phantom", 1000.0, missing_department)
        .await
        .is_err());
    assert!(store.roles().await.unwrap().is_empty());
}

#[tokio::test]
async fn employee_without_manager_stores_null() {
    let store = empty_store().await;
    let dept = store.add_department("Engineering").await.unwrap();
    let role = store.add_role("Engineer", 60000.0, dept).await.unwrap();
    store
        .add_employee("Ada", "Lovelace", role, None)
        .await
        .unwrap();

    let rows = store.employees().await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].manager, None);
}

#[tokio::test]
async fn employee_with_manager_stores_manager_reference() {
    let store = empty_store().await;
    let dept = store.add_department("Engineering").await.unwrap();
    let role = store.add_role("Engineer", 60000.0, dept).await.unwrap();
    let manager = store
        .add_employee("Grace", "Hopper", role, None)
        .await
        .unwrap();
    store
        .add_employee("Ada", "Lovelace", role, Some(manager))
        .await
        .unwrap();

    let rows = store.employees().await.unwrap();
    let ada = rows.iter().find(|e| e.first_name == "Ada").unwrap();
    assert_eq!(ada.manager.as_deref(), Some("Grace Hopper"));
}

#[tokio::test]
async fn employee_requires_existing_role_and_manager() {
    let store = empty_store().await;
    let dept = store.add_department("Engineering").await.unwrap();
    let role = store.add_role("Engineer", 60000.0, dept).await.unwrap();

    assert!(store.add_employee("Ada", "Lovelace", 99, None).await.is_err());
    assert!(store
        .add_employee("Ada", "Lovelace", role, Some(99))
        .await
        .is_err());
    assert!(store.employees().await.unwrap().is_empty());
}

#[tokio::test]
async fn update_changes_only_the_target_employee() {
    let store = empty_store().await;
    let dept = store.add_department("Operations").await.unwrap();
    let analyst = store.add_role("Analyst", 50000.0, dept).await.unwrap();
    let lead = store.add_role("Lead", 70000.0, dept).await.unwrap();
    let first = store.add_employee("Ann", "Bell", analyst, None).await.unwrap();
    let second = store
        .add_employee("Cal", "Dunn", analyst, Some(first))
        .await
        .unwrap();

    let affected = store.update_employee_role(second, lead).await.unwrap();
    assert_eq!(affected, 1);

    let rows = store.employees().await.unwrap();
    let ann = rows.iter().find(|e| e.id == first).unwrap();
    let cal = rows.iter().find(|e| e.id == second).unwrap();
    assert_eq!(ann.title, "Analyst");
    assert_eq!(cal.title, "Lead");
    // The manager reference of the updated row is untouched.
    assert_eq!(cal.manager.as_deref(), Some("Ann Bell"));
}

#[tokio::test]
async fn update_of_missing_employee_touches_no_rows() {
    let store = empty_store().await;
    let dept = store.add_department("Operations").await.unwrap();
    let role = store.add_role("Analyst", 50000.0, dept).await.unwrap();

    let affected = store.update_employee_role(123, role).await.unwrap();
    assert_eq!(affected, 0);
}

#[tokio::test]
async fn listings_do_not_mutate_the_store() {
    let store = empty_store().await;
    let dept = store.add_department("Engineering").await.unwrap();
    let role = store.add_role("Engineer", 60000.0, dept).await.unwrap();
    store
        .add_employee("Ada", "Lovelace", role, None)
        .await
        .unwrap();

    let first_pass = store.employees().await.unwrap();
    let second_pass = store.employees().await.unwrap();
    assert_eq!(first_pass.len(), second_pass.len());
    assert_eq!(first_pass[0].id, second_pass[0].id);
    assert_eq!(first_pass[0].first_name, second_pass[0].first_name);
    assert_eq!(store.departments().await.unwrap().len(), 1);
    assert_eq!(store.roles().await.unwrap().len(), 1);
}

#[tokio::test]
async fn selection_lists_map_labels_to_ids() {
    let store = empty_store().await;
    let dept = store.add_department("Engineering").await.unwrap();
    let role = store.add_role("Engineer", 60000.0, dept).await.unwrap();
    let employee = store
        .add_employee("Ada", "Lovelace", role, None)
        .await
        .unwrap();

    let roles = store.role_choices().await.unwrap();
    assert_eq!(roles.len(), 1);
    assert_eq!(roles[0].id, role);
    assert_eq!(roles[0].name, "Engineer");

    let employees = store.employee_choices().await.unwrap();
    assert_eq!(employees.len(), 1);
    assert_eq!(employees[0].id, employee);
    assert_eq!(employees[0].name, "Ada Lovelace");
}

#[tokio::test]
async fn full_scenario_from_empty_store() {
    let store = empty_store().await;
    let dept = store.add_department("Engineering").await.unwrap();
    let role = store.add_role("Engineer", 60000.0, dept).await.unwrap();
    store
        .add_employee("Ada", "Lovelace", role, None)
        .await
        .unwrap();

    let rows = store.employees().await.unwrap();
    assert_eq!(rows.len(), 1);
    let row = &rows[0];
    assert_eq!(row.first_name, "Ada");
    assert_eq!(row.last_name, "Lovelace");
    assert_eq!(row.title, "Engineer");
    assert_eq!(row.department, "Engineering");
    assert_eq!(row.salary, 60000.0);
    assert_eq!(row.manager, None);
}
