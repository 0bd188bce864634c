use chrono::{Duration, Utc};
use clap::Parser;
use fake::{
    faker::{internet::en::SafeEmail, name::en::Name, phone_number::en::PhoneNumber},
    Fake,
};
use rand::{seq::SliceRandom, Rng};
use sqlx::sqlite::SqlitePoolOptions;

use tripdesk::{
    domain::{
        CreateEmployeeRequest, CreateFixedDepartureRequest, CreateHotelRequest, CreateLeadRequest,
        CreatePackageRequest, CreateVehicleRequest, ItineraryDay, NewBooking,
        UpsertCityPageRequest,
    },
    repository::{
        BookingRepository, CatalogRepository, ContentRepository, EmployeeRepository,
        LeadRepository, PackageRepository, SqliteBookingRepository, SqliteCatalogRepository,
        SqliteContentRepository, SqliteEmployeeRepository, SqliteLeadRepository,
        SqlitePackageRepository,
    },
};

#[derive(Parser)]
#[command(about = "Seed the TripDesk database with demo data")]
struct Args {
    /// Database to seed; falls back to DATABASE_URL, then a local file.
    #[arg(long)]
    database_url: Option<String>,

    /// Number of demo bookings to create.
    #[arg(long, default_value_t = 30)]
    bookings: usize,

    /// Number of demo leads to create.
    #[arg(long, default_value_t = 12)]
    leads: usize,
}

const CITIES: &[&str] = &["Jaipur", "Goa", "Manali", "Udaipur", "Rishikesh", "Leh"];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let database_url = args
        .database_url
        .or_else(|| std::env::var("DATABASE_URL").ok())
        .unwrap_or_else(|| "sqlite:tripdesk.db".to_string());

    println!("Seeding {database_url}...");

    let db_pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await?;

    sqlx::migrate!("./migrations").run(&db_pool).await?;

    let booking_repo = SqliteBookingRepository::new(db_pool.clone());
    let lead_repo = SqliteLeadRepository::new(db_pool.clone());
    let package_repo = SqlitePackageRepository::new(db_pool.clone());
    let catalog_repo = SqliteCatalogRepository::new(db_pool.clone());
    let content_repo = SqliteContentRepository::new(db_pool.clone());
    let employee_repo = SqliteEmployeeRepository::new(db_pool.clone());

    let mut rng = rand::thread_rng();

    // Packages
    let mut package_names = Vec::new();
    for city in CITIES {
        let days = rng.gen_range(3..8);
        let name = format!("{city} Explorer {days}D{}N", days - 1);
        let itinerary = (1..=days)
            .map(|day| ItineraryDay {
                day,
                title: format!("Day {day} in {city}"),
                detail: "Sightseeing and local experiences.".to_string(),
            })
            .collect();

        package_repo
            .create(CreatePackageRequest {
                name: name.clone(),
                city: city.to_string(),
                days,
                nights: days - 1,
                price: rng.gen_range(80..400) as f64 * 100.0,
                summary: format!("A curated {days}-day trip around {city}."),
                itinerary,
            })
            .await?;
        package_names.push((name, city.to_string()));
    }
    println!("  created {} packages", package_names.len());

    // Bookings spread across the lifecycle: paid (old and new), fresh
    // unpaid, and unpaid past the payment window.
    for i in 0..args.bookings {
        let (package_name, city) = package_names.choose(&mut rng).unwrap().clone();
        let age_days = rng.gen_range(0..90);
        let paid = i % 3 == 0;

        booking_repo
            .create(NewBooking {
                customer: Name().fake(),
                email: SafeEmail().fake(),
                phone: PhoneNumber().fake(),
                destination: city,
                package_name,
                amount: rng.gen_range(50..300) as f64 * 100.0,
                payment_status: paid.then(|| "Paid".to_string()),
                booked_at: Some(Utc::now() - Duration::days(age_days)),
                travel_date: Some((Utc::now() + Duration::days(rng.gen_range(10..120))).date_naive()),
            })
            .await?;
    }
    println!("  created {} bookings", args.bookings);

    // Leads
    let sources = ["website", "referral", "walk-in", "instagram"];
    for _ in 0..args.leads {
        let city = CITIES.choose(&mut rng).unwrap();
        lead_repo
            .create(CreateLeadRequest {
                name: Name().fake(),
                email: SafeEmail().fake(),
                phone: PhoneNumber().fake(),
                destination: city.to_string(),
                message: format!("Looking for a family trip to {city} next month."),
                source: sources.choose(&mut rng).unwrap().to_string(),
            })
            .await?;
    }
    println!("  created {} leads", args.leads);

    // Catalog
    for city in CITIES {
        catalog_repo
            .create_hotel(CreateHotelRequest {
                name: format!("Hotel {city} Palace"),
                city: city.to_string(),
                category: "3-star".to_string(),
            })
            .await?;
        catalog_repo
            .create_fixed_departure(CreateFixedDepartureRequest {
                city: city.to_string(),
                package_name: format!("{city} group departure"),
                departure_date: (Utc::now() + Duration::days(rng.gen_range(7..60))).date_naive(),
                seats: rng.gen_range(12..40),
            })
            .await?;
    }
    for (name, capacity) in [("Tempo Traveller", 12), ("Innova", 7), ("Coach", 45)] {
        catalog_repo
            .create_vehicle(CreateVehicleRequest {
                name: name.to_string(),
                capacity,
            })
            .await?;
    }
    println!("  created catalog entries");

    // City pages
    for city in CITIES {
        let slug = city.to_lowercase();
        content_repo
            .upsert(
                &slug,
                UpsertCityPageRequest {
                    city: city.to_string(),
                    hero_heading: format!("Discover {city}"),
                    intro: format!("Hand-picked stays and experiences across {city}."),
                    highlights: vec![
                        "Curated itineraries".to_string(),
                        "Local guides".to_string(),
                        "24x7 trip support".to_string(),
                    ],
                },
            )
            .await?;
    }
    println!("  created {} city pages", CITIES.len());

    // Employees
    for (name, email, role) in [
        ("Asha Verma", "asha@tripdesk.local", "Operations"),
        ("Rahul Mehta", "rahul@tripdesk.local", "Sales"),
        ("Priya Nair", "priya@tripdesk.local", "Content"),
    ] {
        employee_repo
            .create(CreateEmployeeRequest {
                name: name.to_string(),
                email: email.to_string(),
                role: role.to_string(),
            })
            .await?;
    }
    println!("  created employees");

    println!("Done.");
    Ok(())
}
