use sea_orm::{ConnectionTrait, Database, DatabaseConnection, DbErr, Statement};

pub async fn init_db(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    let db = Database::connect(database_url).await?;

    // Run migrations manually (simple SQL)
    run_migrations(&db).await?;

    Ok(db)
}

async fn run_migrations(db: &DatabaseConnection) -> Result<(), DbErr> {
    // Donors and schools
    db.execute(Statement::from_string(
        db.get_database_backend(),
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            email TEXT NOT NULL,
            phone TEXT,
            address TEXT,
            role TEXT NOT NULL, -- 'donor', 'school'
            organization TEXT,
            rating INTEGER NOT NULL DEFAULT 0,
            books_received INTEGER NOT NULL DEFAULT 0,
            registered_on TEXT NOT NULL
        )
        "#
        .to_owned(),
    ))
    .await?;

    // Donation and request listings
    db.execute(Statement::from_string(
        db.get_database_backend(),
        r#"
        CREATE TABLE IF NOT EXISTS books (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            owner_id INTEGER NOT NULL,
            is_donation BOOLEAN NOT NULL DEFAULT 1,
            title TEXT NOT NULL,
            grade_level TEXT,
            language TEXT,
            condition TEXT,
            photo_url TEXT,
            quantity INTEGER NOT NULL DEFAULT 1,
            fulfilled_qty INTEGER NOT NULL DEFAULT 0,
            listed_on TEXT NOT NULL,
            FOREIGN KEY (owner_id) REFERENCES users(id),
            CHECK (fulfilled_qty >= 0 AND fulfilled_qty <= quantity)
        )
        "#
        .to_owned(),
    ))
    .await?;

    db.execute(Statement::from_string(
        db.get_database_backend(),
        "CREATE INDEX IF NOT EXISTS idx_books_owner ON books(owner_id, is_donation)".to_owned(),
    ))
    .await?;

    // Matches between a donation and a request
    db.execute(Statement::from_string(
        db.get_database_backend(),
        r#"
        CREATE TABLE IF NOT EXISTS matches (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            donation_id INTEGER NOT NULL,
            request_id INTEGER NOT NULL,
            matched_qty INTEGER NOT NULL DEFAULT 1,
            matched_on TEXT NOT NULL,
            status TEXT NOT NULL DEFAULT 'Pending', -- 'Pending', 'InTransit', 'Delivered', 'Cancelled'
            FOREIGN KEY (donation_id) REFERENCES books(id),
            FOREIGN KEY (request_id) REFERENCES books(id)
        )
        "#
        .to_owned(),
    ))
    .await?;

    db.execute(Statement::from_string(
        db.get_database_backend(),
        "CREATE INDEX IF NOT EXISTS idx_matches_donation ON matches(donation_id)".to_owned(),
    ))
    .await?;

    db.execute(Statement::from_string(
        db.get_database_backend(),
        "CREATE INDEX IF NOT EXISTS idx_matches_request ON matches(request_id)".to_owned(),
    ))
    .await?;

    // Operators allowed to run matching and move matches along
    db.execute(Statement::from_string(
        db.get_database_backend(),
        r#"
        CREATE TABLE IF NOT EXISTS operators (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            username TEXT NOT NULL UNIQUE,
            password_hash TEXT NOT NULL,
            created_at TEXT NOT NULL
        )
        "#
        .to_owned(),
    ))
    .await?;

    Ok(())
}
