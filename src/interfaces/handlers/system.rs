use std::{sync::RwLock, time::Duration};

use actix_web::{get, web, HttpRequest, HttpResponse, Responder};
use chrono::{DateTime, Utc};
use humantime::format_duration;
use once_cell::sync::Lazy;
use serde::Serialize;
use sysinfo::System;

use crate::{constants::START_TIME, db::postgres::check_connection, errors::AppError, AppState};

/// Snapshots younger than this are served without probing the host again.
const SNAPSHOT_TTL_SECONDS: i64 = 5;

#[derive(Serialize, Clone)]
struct HostInfo {
    os: String,
    kernel: String,
    hostname: String,
    cpu_count: usize,
    memory_total: String,
}

#[derive(Serialize, Clone)]
struct HealthReport {
    status: &'static str,
    uptime: String,
    timestamp: String,
    start_at: String,
    database: &'static str,
    version: &'static str,
    memory_usage: String,
    system: HostInfo,
}

struct Snapshot {
    taken_at: DateTime<Utc>,
    report: HealthReport,
}

static SNAPSHOT: Lazy<RwLock<Option<Snapshot>>> = Lazy::new(|| RwLock::new(None));

fn gigabytes(bytes: u64) -> String {
    format!("{:.2} GB", bytes as f64 / (1024.0 * 1024.0 * 1024.0))
}

async fn database_status(state: &AppState) -> &'static str {
    let Some(pool) = &state.db_pool else {
        return "Not configured";
    };

    match check_connection(pool).await {
        Ok(()) => "OK",
        Err(e) => {
            tracing::warn!("Health check database probe failed: {}", e);
            "Unavailable"
        }
    }
}

async fn probe(state: &AppState, now: DateTime<Utc>) -> HealthReport {
    let mut sys = System::new_all();
    sys.refresh_all();

    let unknown = || "Unknown".to_string();
    let host = HostInfo {
        os: System::name().unwrap_or_else(unknown),
        kernel: System::kernel_version().unwrap_or_else(unknown),
        hostname: System::host_name().unwrap_or_else(unknown),
        cpu_count: sys.cpus().len(),
        memory_total: gigabytes(sys.total_memory()),
    };

    let memory_usage = sysinfo::get_current_pid()
        .ok()
        .and_then(|pid| sys.process(pid))
        .map(|p| format!("{:.2} MB", p.memory() as f64 / (1024.0 * 1024.0)))
        .unwrap_or_else(unknown);

    let uptime_secs = now.signed_duration_since(*START_TIME).num_seconds().max(0) as u64;

    HealthReport {
        status: "OK",
        uptime: format_duration(Duration::from_secs(uptime_secs)).to_string(),
        timestamp: now.to_rfc3339(),
        start_at: START_TIME.to_rfc3339(),
        database: database_status(state).await,
        version: env!("CARGO_PKG_VERSION"),
        memory_usage,
        system: host,
    }
}

fn fresh_snapshot(now: DateTime<Utc>) -> Option<HealthReport> {
    let guard = SNAPSHOT.read().ok()?;
    guard
        .as_ref()
        .filter(|snap| (now - snap.taken_at).num_seconds() < SNAPSHOT_TTL_SECONDS)
        .map(|snap| snap.report.clone())
}

#[get("/health")]
pub async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let now = Utc::now();

    if let Some(report) = fresh_snapshot(now) {
        return HttpResponse::Ok().json(report);
    }

    let report = probe(&state, now).await;
    match SNAPSHOT.write() {
        Ok(mut slot) => *slot = Some(Snapshot { taken_at: now, report: report.clone() }),
        Err(e) => tracing::warn!("Health snapshot lock poisoned: {}", e),
    }

    HttpResponse::Ok().json(report)
}

pub async fn route_not_found(req: HttpRequest) -> Result<HttpResponse, AppError> {
    Err(AppError::NotFound(format!("Route not found: {}", req.path())))
}
