use sea_orm::*;

use crate::infrastructure::auth::hash_password;
use crate::models::{book, operator, user};

/// Create the operator account if it does not exist yet.
pub async fn ensure_operator<C: ConnectionTrait>(
    conn: &C,
    username: &str,
    password: &str,
) -> Result<(), DbErr> {
    let exists = operator::Entity::find()
        .filter(operator::Column::Username.eq(username))
        .one(conn)
        .await?
        .is_some();
    if exists {
        tracing::debug!("Operator account '{}' already exists", username);
        return Ok(());
    }

    let password_hash = hash_password(password).map_err(DbErr::Custom)?;
    operator::ActiveModel {
        username: Set(username.to_owned()),
        password_hash: Set(password_hash),
        created_at: Set(chrono::Utc::now().to_rfc3339()),
        ..Default::default()
    }
    .insert(conn)
    .await?;

    tracing::info!("Operator account '{}' created", username);
    Ok(())
}

struct DemoUser {
    name: &'static str,
    email: &'static str,
    address: &'static str,
    role: &'static str,
    organization: &'static str,
    rating: i32,
    books_received: i32,
}

struct DemoListing {
    owner: usize,
    is_donation: bool,
    title: &'static str,
    quantity: i32,
    grade_level: &'static str,
    language: &'static str,
    condition: Option<&'static str>,
}

const DEMO_USERS: [DemoUser; 4] = [
    DemoUser {
        name: "John Donor",
        email: "john@example.com",
        address: "123 Main St, City A",
        role: "donor",
        organization: "Individual",
        rating: 5,
        books_received: 0,
    },
    DemoUser {
        name: "Jane Donor",
        email: "jane@example.com",
        address: "456 Oak St, City B",
        role: "donor",
        organization: "Book Club",
        rating: 4,
        books_received: 0,
    },
    DemoUser {
        name: "Principal Smith",
        email: "smith@cityelementary.edu",
        address: "789 School Ave, City A",
        role: "school",
        organization: "City Elementary School",
        rating: 4,
        books_received: 5,
    },
    DemoUser {
        name: "Principal Johnson",
        email: "johnson@ruralhigh.edu",
        address: "101 Education Blvd, City C",
        role: "school",
        organization: "Rural High School",
        rating: 3,
        books_received: 2,
    },
];

const DEMO_LISTINGS: [DemoListing; 5] = [
    DemoListing {
        owner: 0,
        is_donation: true,
        title: "Math Textbook Grade 5",
        quantity: 10,
        grade_level: "Elementary",
        language: "English",
        condition: Some("Good"),
    },
    DemoListing {
        owner: 1,
        is_donation: true,
        title: "Science Encyclopedia",
        quantity: 5,
        grade_level: "Middle",
        language: "English",
        condition: Some("Excellent"),
    },
    DemoListing {
        owner: 0,
        is_donation: true,
        title: "Children's Story Collection",
        quantity: 15,
        grade_level: "Elementary",
        language: "Spanish",
        condition: Some("Fair"),
    },
    DemoListing {
        owner: 2,
        is_donation: false,
        title: "Math Textbook Grade 5",
        quantity: 8,
        grade_level: "Elementary",
        language: "English",
        condition: None,
    },
    DemoListing {
        owner: 3,
        is_donation: false,
        title: "Science Encyclopedia",
        quantity: 3,
        grade_level: "Middle",
        language: "English",
        condition: None,
    },
];

/// Populate an empty database with two donors, two schools and a handful of
/// listings. Does nothing if any user already exists.
pub async fn seed_demo_data(db: &DatabaseConnection) -> Result<(), DbErr> {
    if user::Entity::find().count(db).await? > 0 {
        tracing::info!("Database already has users, skipping demo seed");
        return Ok(());
    }

    let txn = db.begin().await?;
    let now = chrono::Utc::now().to_rfc3339();

    let mut user_ids = Vec::with_capacity(DEMO_USERS.len());
    for demo in &DEMO_USERS {
        let model = user::ActiveModel {
            name: Set(demo.name.to_owned()),
            email: Set(demo.email.to_owned()),
            phone: Set(None),
            address: Set(Some(demo.address.to_owned())),
            role: Set(demo.role.to_owned()),
            organization: Set(Some(demo.organization.to_owned())),
            rating: Set(demo.rating),
            books_received: Set(demo.books_received),
            registered_on: Set(now.clone()),
            ..Default::default()
        };
        user_ids.push(model.insert(&txn).await?.id);
    }

    for demo in &DEMO_LISTINGS {
        let model = book::ActiveModel {
            owner_id: Set(user_ids[demo.owner]),
            is_donation: Set(demo.is_donation),
            title: Set(demo.title.to_owned()),
            grade_level: Set(Some(demo.grade_level.to_owned())),
            language: Set(Some(demo.language.to_owned())),
            condition: Set(demo.condition.map(str::to_owned)),
            photo_url: Set(None),
            quantity: Set(demo.quantity),
            fulfilled_qty: Set(0),
            listed_on: Set(now.clone()),
            ..Default::default()
        };
        model.insert(&txn).await?;
    }

    ensure_operator(&txn, "admin", "admin").await?;

    txn.commit().await?;

    tracing::info!(
        "Seeded {} users and {} listings",
        DEMO_USERS.len(),
        DEMO_LISTINGS.len()
    );
    Ok(())
}
