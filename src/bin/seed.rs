//! Development data seeder
//!
//! Wipes all tables (children first) and repopulates them with
//! synthetic users, posts, comments, albums, photos and todos.
//! Run with `cargo run --bin seed`.

use anyhow::Context;
use rand::seq::SliceRandom;
use rand::Rng;
use sqlx::PgPool;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const USER_COUNT: usize = 20;

const FIRST_NAMES: &[&str] = &[
    "Alice", "Bruno", "Carmen", "Diego", "Elena", "Felix", "Greta", "Hugo", "Ines", "Jonas",
    "Klara", "Liam", "Marta", "Nadia", "Oscar", "Paula", "Quinn", "Rosa", "Samuel", "Tessa",
];

const LAST_NAMES: &[&str] = &[
    "Alvarez", "Brennan", "Costa", "Dupont", "Eriksen", "Fischer", "Garcia", "Hoffman",
    "Ivanova", "Jensen", "Keller", "Lindgren", "Moreau", "Novak", "Ortega", "Petrov",
];

const STREETS: &[&str] = &[
    "Maple Street", "Oak Avenue", "Cedar Lane", "Birch Road", "Elm Drive", "Willow Way",
];

const CITIES: &[&str] = &[
    "Riverside", "Lakewood", "Fairview", "Greenfield", "Ashford", "Brookhaven",
];

const COMPANY_NAMES: &[&str] = &[
    "Acme Labs", "Northwind Trading", "Bluepeak Systems", "Harbor Analytics", "Quartz Works",
];

const CATCH_PHRASES: &[&str] = &[
    "Proactive scalable synergy",
    "Streamlined next-generation platform",
    "Adaptive value-added solutions",
    "Integrated multi-channel framework",
];

const COMPANY_BS: &[&str] = &[
    "empower seamless channels",
    "leverage distributed markets",
    "orchestrate dynamic deliverables",
    "iterate frictionless paradigms",
];

const WORDS: &[&str] = &[
    "river", "signal", "granite", "meadow", "copper", "lantern", "harvest", "orbit", "timber",
    "ember", "summit", "willow", "crystal", "harbor", "falcon", "meridian", "canvas", "drift",
    "quarry", "beacon", "cinder", "alpine", "velvet", "monsoon", "prairie", "cobalt",
];

fn sentence<R: Rng>(rng: &mut R, words: usize) -> String {
    let picked: Vec<&str> = (0..words)
        .map(|_| *WORDS.choose(rng).unwrap())
        .collect();
    let mut s = picked.join(" ");
    if let Some(first) = s.get_mut(0..1) {
        first.make_ascii_uppercase();
    }
    s.push('.');
    s
}

fn paragraph<R: Rng>(rng: &mut R) -> String {
    let sentences: Vec<String> = (0..rng.gen_range(2..=4))
        .map(|_| {
            let words = rng.gen_range(6..=12);
            sentence(rng, words)
        })
        .collect();
    sentences.join(" ")
}

fn title<R: Rng>(rng: &mut R) -> String {
    let picked: Vec<&str> = (0..rng.gen_range(3..=6))
        .map(|_| *WORDS.choose(rng).unwrap())
        .collect();
    let mut s = picked.join(" ");
    if let Some(first) = s.get_mut(0..1) {
        first.make_ascii_uppercase();
    }
    s
}

fn photo_url(seed: &str, size: u32) -> String {
    format!("https://picsum.photos/seed/{seed}/{size}/{size}")
}

async fn wipe(pool: &PgPool) -> Result<(), sqlx::Error> {
    // Children before parents
    for table in ["photos", "todos", "comments", "albums", "posts", "users"] {
        sqlx::query(&format!("DELETE FROM {table}"))
            .execute(pool)
            .await?;
    }
    Ok(())
}

struct Summary {
    users: usize,
    posts: usize,
    comments: usize,
    albums: usize,
    photos: usize,
    todos: usize,
}

async fn seed(pool: &PgPool) -> Result<Summary, sqlx::Error> {
    let mut rng = rand::thread_rng();
    let mut summary = Summary {
        users: 0,
        posts: 0,
        comments: 0,
        albums: 0,
        photos: 0,
        todos: 0,
    };

    let mut user_ids: Vec<i64> = Vec::with_capacity(USER_COUNT);
    let mut post_ids: Vec<i64> = Vec::new();

    for i in 0..USER_COUNT {
        let first = FIRST_NAMES[i % FIRST_NAMES.len()];
        let last = LAST_NAMES[rng.gen_range(0..LAST_NAMES.len())];
        let name = format!("{first} {last}");
        let username = format!("{}.{}{}", first.to_lowercase(), last.to_lowercase(), i);
        let email = format!("{username}@example.com");
        let phone = format!(
            "+1-555-{:03}-{:04}",
            rng.gen_range(100..1000),
            rng.gen_range(0..10000)
        );
        let website = format!("https://{}.example.net", username.replace('.', "-"));

        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO users (name, username, email, phone, website, street, suite, city,
                               zipcode, lat, lng, company_name, company_catch_phrase, company_bs)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            RETURNING id
            "#,
        )
        .bind(&name)
        .bind(&username)
        .bind(&email)
        .bind(&phone)
        .bind(&website)
        .bind(format!("{} {}", rng.gen_range(1..999), STREETS.choose(&mut rng).unwrap()))
        .bind(format!("Apt. {}", rng.gen_range(1..50)))
        .bind(*CITIES.choose(&mut rng).unwrap())
        .bind(format!("{:05}", rng.gen_range(10000..99999)))
        .bind(format!("{:.4}", rng.gen_range(-90.0..90.0)))
        .bind(format!("{:.4}", rng.gen_range(-180.0..180.0)))
        .bind(*COMPANY_NAMES.choose(&mut rng).unwrap())
        .bind(*CATCH_PHRASES.choose(&mut rng).unwrap())
        .bind(*COMPANY_BS.choose(&mut rng).unwrap())
        .fetch_one(pool)
        .await?;

        user_ids.push(id);
        summary.users += 1;
    }
    tracing::info!("Seeded {} users", summary.users);

    for &user_id in &user_ids {
        for _ in 0..rng.gen_range(3..=5) {
            let id: i64 = sqlx::query_scalar(
                "INSERT INTO posts (title, body, user_id) VALUES ($1, $2, $3) RETURNING id",
            )
            .bind(title(&mut rng))
            .bind(paragraph(&mut rng))
            .bind(user_id)
            .fetch_one(pool)
            .await?;
            post_ids.push(id);
            summary.posts += 1;
        }
    }
    tracing::info!("Seeded {} posts", summary.posts);

    for &post_id in &post_ids {
        for _ in 0..rng.gen_range(1..=3) {
            // 70% of comments come from a known user, the rest are anonymous
            let commenter = if rng.gen_bool(0.7) {
                Some(*user_ids.choose(&mut rng).unwrap())
            } else {
                None
            };
            let word = WORDS.choose(&mut rng).unwrap();
            sqlx::query(
                "INSERT INTO comments (name, email, body, post_id, user_id) VALUES ($1, $2, $3, $4, $5)",
            )
            .bind(title(&mut rng))
            .bind(format!("{word}{}@example.org", rng.gen_range(1..1000)))
            .bind(paragraph(&mut rng))
            .bind(post_id)
            .bind(commenter)
            .execute(pool)
            .await?;
            summary.comments += 1;
        }
    }
    tracing::info!("Seeded {} comments", summary.comments);

    for &user_id in &user_ids {
        for _ in 0..rng.gen_range(2..=4) {
            let album_id: i64 = sqlx::query_scalar(
                "INSERT INTO albums (title, user_id) VALUES ($1, $2) RETURNING id",
            )
            .bind(title(&mut rng))
            .bind(user_id)
            .fetch_one(pool)
            .await?;
            summary.albums += 1;

            for _ in 0..rng.gen_range(5..=10) {
                let seed_key = format!("{album_id}-{}", rng.gen_range(0..100000));
                sqlx::query(
                    "INSERT INTO photos (title, url, thumbnail_url, album_id) VALUES ($1, $2, $3, $4)",
                )
                .bind(title(&mut rng))
                .bind(photo_url(&seed_key, 600))
                .bind(photo_url(&seed_key, 150))
                .bind(album_id)
                .execute(pool)
                .await?;
                summary.photos += 1;
            }
        }
    }
    tracing::info!("Seeded {} albums, {} photos", summary.albums, summary.photos);

    for &user_id in &user_ids {
        for _ in 0..rng.gen_range(5..=10) {
            sqlx::query("INSERT INTO todos (title, completed, user_id) VALUES ($1, $2, $3)")
                .bind(title(&mut rng))
                .bind(rng.gen_bool(0.4))
                .bind(user_id)
                .execute(pool)
                .await?;
            summary.todos += 1;
        }
    }
    tracing::info!("Seeded {} todos", summary.todos);

    Ok(summary)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = todos_api::Config::from_env()
        .map_err(|e| anyhow::anyhow!(e))
        .context("failed to load configuration")?;

    let pool = todos_api::db::create_pool(&config.database)
        .await
        .context("failed to connect to database")?;

    todos_api::db::run_migrations(&pool)
        .await
        .context("failed to run migrations")?;

    tracing::info!("Wiping existing data");
    wipe(&pool).await.context("failed to wipe existing data")?;

    let summary = seed(&pool).await.context("seeding failed")?;

    tracing::info!(
        "Seeding complete: {} users, {} posts, {} comments, {} albums, {} photos, {} todos",
        summary.users,
        summary.posts,
        summary.comments,
        summary.albums,
        summary.photos,
        summary.todos
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentence_is_capitalized_and_terminated() {
        let mut rng = rand::thread_rng();
        let s = sentence(&mut rng, 5);
        assert!(s.chars().next().unwrap().is_ascii_uppercase());
        assert!(s.ends_with('.'));
    }

    #[test]
    fn paragraphs_contain_two_to_four_sentences() {
        let mut rng = rand::thread_rng();
        for _ in 0..50 {
            let p = paragraph(&mut rng);
            let sentences = p.matches('.').count();
            assert!((2..=4).contains(&sentences));
        }
    }

    #[test]
    fn titles_stay_within_word_bounds() {
        let mut rng = rand::thread_rng();
        for _ in 0..50 {
            let t = title(&mut rng);
            let words = t.split_whitespace().count();
            assert!((3..=6).contains(&words));
        }
    }

    #[test]
    fn photo_url_embeds_seed_and_size() {
        assert_eq!(
            photo_url("42-7", 600),
            "https://picsum.photos/seed/42-7/600/600"
        );
        assert_eq!(
            photo_url("42-7", 150),
            "https://picsum.photos/seed/42-7/150/150"
        );
    }
}
