//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `roster_core` wiring end to
//!   end: identity gate, in-memory store, one record lifecycle.
//! - Keep output deterministic for quick local sanity checks.

use chrono::Utc;
use roster_core::{
    ClientDraft, ClientService, IdentityHandle, IdentityProvider, IntervalSpec, IntervalUnit,
    SqliteClientStore, StaticIdentityProvider, UrgencyCounts,
};

const SMOKE_EMAIL: &str = "smoke@example.com";
const SMOKE_PASSWORD: &str = "smoke";

fn main() {
    println!("roster_core version={}", roster_core::core_version());

    if let Err(message) = run_smoke() {
        eprintln!("smoke failed: {message}");
        std::process::exit(1);
    }
}

fn run_smoke() -> Result<(), String> {
    // Roster access is owner-scoped, so the probe signs in first, the way
    // any real caller would.
    let mut identity: IdentityHandle<StaticIdentityProvider> = IdentityHandle::new();
    identity.initialize(StaticIdentityProvider::new().with_user(
        SMOKE_EMAIL,
        SMOKE_PASSWORD,
        "smoke-owner",
    ));
    let owner_id = identity
        .provider_mut()
        .map_err(|err| err.to_string())?
        .sign_in(SMOKE_EMAIL, SMOKE_PASSWORD)
        .map_err(|err| err.to_string())?;
    println!("signed in owner={owner_id}");

    let conn = roster_core::db::open_db_in_memory().map_err(|err| err.to_string())?;
    let service = ClientService::new(SqliteClientStore::new(&conn));

    let now = Utc::now();
    let interval = IntervalSpec::new(22, IntervalUnit::Days).map_err(|err| err.to_string())?;
    let draft = ClientDraft {
        name: "Smoke Test Client".to_string(),
        ..ClientDraft::default()
    };

    let client = service
        .create_client(draft, interval, owner_id.clone(), now)
        .map_err(|err| err.to_string())?;
    println!("created code={} due={}", client.code, client.next_maintenance_date);

    let after_service = service
        .confirm_maintenance(&client, now)
        .map_err(|err| err.to_string())?;
    println!("history entries={}", after_service.history.len());

    let UrgencyCounts {
        expired,
        critical,
        warning,
        normal,
    } = service
        .urgency_summary(&owner_id, now)
        .map_err(|err| err.to_string())?;
    println!("urgency expired={expired} critical={critical} warning={warning} normal={normal}");

    identity.provider_mut().map_err(|err| err.to_string())?.sign_out();
    println!("signed out");

    Ok(())
}
