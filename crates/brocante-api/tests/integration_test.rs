// Integration tests for the Brocante API
// Run with: cargo test --test integration_test -- --ignored
// Requires a running server (and its database) on localhost:3000

use serde_json::{json, Value};

const API_BASE_URL: &str = "http://localhost:3000";

fn unique_email(tag: &str) -> String {
    let suffix = uuid::Uuid::new_v4().simple().to_string();
    format!("{tag}-{suffix}@example.com")
}

async fn signup(client: &reqwest::Client, email: &str) -> Value {
    let response = client
        .post(format!("{API_BASE_URL}/user/signup"))
        .json(&json!({
            "username": "camille",
            "email": email,
            "password": "s3cret-pass",
            "phone": "+33600000000"
        }))
        .send()
        .await
        .expect("Failed to sign up");

    assert_eq!(response.status(), 201);
    response.json().await.expect("Failed to parse auth payload")
}

#[tokio::test]
#[ignore] // Run with: cargo test --test integration_test -- --ignored
async fn test_signup_login_and_offer_workflow() {
    let client = reqwest::Client::new();
    let email = unique_email("workflow");

    println!("🧪 Testing signup/login/offer workflow...");

    // Step 1: Sign up
    let auth = signup(&client, &email).await;
    let token = auth["token"].as_str().expect("token missing").to_string();
    assert_eq!(auth["account"]["username"], "camille");
    // Credential secrets never appear in the payload
    assert!(auth.get("hash").is_none());
    assert!(auth.get("salt").is_none());
    println!("✅ Signed up: {}", auth["id"]);

    // Step 2: Duplicate signup is rejected regardless of other fields
    let dup = client
        .post(format!("{API_BASE_URL}/user/signup"))
        .json(&json!({
            "username": "other",
            "email": email,
            "password": "different",
            "phone": "+33611111111"
        }))
        .send()
        .await
        .expect("Failed to send duplicate signup");
    assert_eq!(dup.status(), 409);

    // Step 3: Login with the right password
    let login = client
        .post(format!("{API_BASE_URL}/user/login"))
        .json(&json!({ "email": email, "password": "s3cret-pass" }))
        .send()
        .await
        .expect("Failed to login");
    assert_eq!(login.status(), 200);

    // Step 4: Wrong password and unknown email are indistinguishable
    let wrong_password = client
        .post(format!("{API_BASE_URL}/user/login"))
        .json(&json!({ "email": email, "password": "nope" }))
        .send()
        .await
        .expect("Failed to send login");
    let unknown_email = client
        .post(format!("{API_BASE_URL}/user/login"))
        .json(&json!({ "email": unique_email("ghost"), "password": "nope" }))
        .send()
        .await
        .expect("Failed to send login");
    assert_eq!(wrong_password.status(), 401);
    assert_eq!(unknown_email.status(), 401);
    let a: Value = wrong_password.json().await.unwrap();
    let b: Value = unknown_email.json().await.unwrap();
    assert_eq!(a, b, "auth failures must not reveal the cause");

    // Step 5: Publishing without a token is rejected
    let unauthenticated = client
        .post(format!("{API_BASE_URL}/offer/publish"))
        .json(&json!({ "title": "Chemise", "price": 10.0 }))
        .send()
        .await
        .expect("Failed to send publish");
    assert_eq!(unauthenticated.status(), 401);

    // Step 6: Publish with facets
    let publish = client
        .post(format!("{API_BASE_URL}/offer/publish"))
        .bearer_auth(&token)
        .json(&json!({
            "title": "Robe d'été",
            "description": "Portée deux fois",
            "price": 15.0,
            "brand": "Acme",
            "size": "M",
            "condition": "Très bon état",
            "color": "Bleu",
            "city": "Paris"
        }))
        .send()
        .await
        .expect("Failed to publish offer");
    assert_eq!(publish.status(), 201);
    let offer: Value = publish.json().await.expect("Failed to parse offer");
    let offer_id = offer["id"].as_str().expect("offer id missing").to_string();
    println!("✅ Published offer: {offer_id}");

    // Step 7: Facet round-trip on fetch, display-labeled and ordered
    let fetched: Value = client
        .get(format!("{API_BASE_URL}/offer/{offer_id}"))
        .send()
        .await
        .expect("Failed to fetch offer")
        .json()
        .await
        .expect("Failed to parse offer");
    assert_eq!(
        fetched["details"],
        json!([
            { "MARQUE": "Acme" },
            { "TAILLE": "M" },
            { "ÉTAT": "Très bon état" },
            { "COULEUR": "Bleu" },
            { "EMPLACEMENT": "Paris" }
        ])
    );
    // Owner projection carries no credential fields
    assert!(fetched["owner"].get("token").is_none());
    assert!(fetched["owner"].get("email").is_none());
    assert_eq!(fetched["owner"]["username"], "camille");

    // Step 8: Update a subset of fields
    let update = client
        .put(format!("{API_BASE_URL}/offer/update"))
        .bearer_auth(&token)
        .json(&json!({ "id": offer_id, "price": 18.5 }))
        .send()
        .await
        .expect("Failed to update offer");
    assert_eq!(update.status(), 200);
    let updated: Value = update.json().await.unwrap();
    assert_eq!(updated["price"], 18.5);
    assert_eq!(updated["title"], "Robe d'été");

    // Step 9: Update without an id is a bad request
    let missing_id = client
        .put(format!("{API_BASE_URL}/offer/update"))
        .bearer_auth(&token)
        .json(&json!({ "price": 1.0 }))
        .send()
        .await
        .expect("Failed to send update");
    assert_eq!(missing_id.status(), 400);

    // Step 10: Another account cannot touch the offer
    let other = signup(&client, &unique_email("intruder")).await;
    let other_token = other["token"].as_str().unwrap();
    let foreign_delete = client
        .delete(format!("{API_BASE_URL}/offer/delete/{offer_id}"))
        .bearer_auth(other_token)
        .send()
        .await
        .expect("Failed to send delete");
    assert_eq!(foreign_delete.status(), 404);

    // Step 11: Delete as the owner
    let deleted = client
        .delete(format!("{API_BASE_URL}/offer/delete/{offer_id}"))
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to delete offer");
    assert_eq!(deleted.status(), 204);

    let gone = client
        .get(format!("{API_BASE_URL}/offer/{offer_id}"))
        .send()
        .await
        .expect("Failed to fetch offer");
    assert_eq!(gone.status(), 404);

    println!("✅ Workflow complete");
}

#[tokio::test]
#[ignore] // Run with: cargo test --test integration_test -- --ignored
async fn test_search_filter_sort_paginate() {
    let client = reqwest::Client::new();
    let auth = signup(&client, &unique_email("seller")).await;
    let token = auth["token"].as_str().unwrap().to_string();

    println!("🧪 Testing offer search...");

    // Seed offers with a unique marker so filters isolate this run
    let marker = uuid::Uuid::new_v4().simple().to_string();
    let prices = [5.0, 10.0, 15.0, 20.0, 25.0];
    for (i, price) in prices.iter().enumerate() {
        let response = client
            .post(format!("{API_BASE_URL}/offer/publish"))
            .bearer_auth(&token)
            .json(&json!({
                "title": format!("pull-{marker}-{i}"),
                "price": price,
                "city": "Lyon"
            }))
            .send()
            .await
            .expect("Failed to publish offer");
        assert_eq!(response.status(), 201);
    }

    // Filter: title substring is case-insensitive, bounds inclusive
    let filtered: Value = client
        .get(format!(
            "{API_BASE_URL}/offers?title=PULL-{marker}&priceMin=10&priceMax=20"
        ))
        .send()
        .await
        .expect("Failed to search")
        .json()
        .await
        .expect("Failed to parse search response");
    assert_eq!(filtered["count"], 3);
    for offer in filtered["offers"].as_array().unwrap() {
        let price = offer["price"].as_f64().unwrap();
        assert!((10.0..=20.0).contains(&price));
    }

    // Sort: price-desc is non-increasing
    let sorted: Value = client
        .get(format!(
            "{API_BASE_URL}/offers?title={marker}&sort=price-desc"
        ))
        .send()
        .await
        .expect("Failed to search")
        .json()
        .await
        .expect("Failed to parse search response");
    let sorted_prices: Vec<f64> = sorted["offers"]
        .as_array()
        .unwrap()
        .iter()
        .map(|o| o["price"].as_f64().unwrap())
        .collect();
    assert_eq!(sorted_prices, vec![25.0, 20.0, 15.0, 10.0, 5.0]);

    // Pagination: count stays at N while pages shrink at the tail
    let page2: Value = client
        .get(format!(
            "{API_BASE_URL}/offers?title={marker}&limit=2&page=2&sort=price-asc"
        ))
        .send()
        .await
        .expect("Failed to search")
        .json()
        .await
        .expect("Failed to parse search response");
    assert_eq!(page2["count"], 5);
    assert_eq!(page2["offers"].as_array().unwrap().len(), 2);

    let page3: Value = client
        .get(format!(
            "{API_BASE_URL}/offers?title={marker}&limit=2&page=3&sort=price-asc"
        ))
        .send()
        .await
        .expect("Failed to search")
        .json()
        .await
        .expect("Failed to parse search response");
    assert_eq!(page3["count"], 5);
    assert_eq!(page3["offers"].as_array().unwrap().len(), 1);

    // No matches is a successful empty response, not an error
    let empty = client
        .get(format!("{API_BASE_URL}/offers?title=no-such-{marker}"))
        .send()
        .await
        .expect("Failed to search");
    assert_eq!(empty.status(), 200);
    let empty: Value = empty.json().await.unwrap();
    assert_eq!(empty["count"], 0);
    assert_eq!(empty["offers"], json!([]));

    println!("✅ Search behaves");
}

#[tokio::test]
#[ignore] // Run with: cargo test --test integration_test -- --ignored
async fn test_payment_gate() {
    let client = reqwest::Client::new();
    let auth = signup(&client, &unique_email("buyer")).await;
    let token = auth["token"].as_str().unwrap().to_string();

    println!("🧪 Testing payment gate...");

    let offer: Value = client
        .post(format!("{API_BASE_URL}/offer/publish"))
        .bearer_auth(&token)
        .json(&json!({ "title": "Veste", "price": 15.0 }))
        .send()
        .await
        .expect("Failed to publish offer")
        .json()
        .await
        .expect("Failed to parse offer");
    let offer_id = offer["id"].as_str().unwrap();

    // Claimed 17.00 against listed 15.00 -> margin 2 < 3, refused
    // before any charge is attempted
    let mismatch = client
        .post(format!("{API_BASE_URL}/payment"))
        .json(&json!({
            "productId": offer_id,
            "amount": 17.0,
            "token": "tok_visa",
            "title": "Veste"
        }))
        .send()
        .await
        .expect("Failed to send payment");
    assert_eq!(mismatch.status(), 409);
    let body: Value = mismatch.json().await.unwrap();
    assert_eq!(body["message"], "price mismatch");

    // Unknown offer id
    let unknown = client
        .post(format!("{API_BASE_URL}/payment"))
        .json(&json!({
            "productId": uuid::Uuid::new_v4(),
            "amount": 99.0,
            "token": "tok_visa"
        }))
        .send()
        .await
        .expect("Failed to send payment");
    assert_eq!(unknown.status(), 404);

    println!("✅ Payment gate refuses underpayment without charging");
}
