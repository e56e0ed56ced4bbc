// Allow dead code: API response structs have fields for completeness
#![allow(dead_code)]

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Headline counters for the admin dashboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsTotals {
    #[serde(rename = "total_visitas")]
    pub total_visits: i64,
    #[serde(rename = "visitas_pendientes")]
    pub pending_visits: i64,
    #[serde(rename = "visitas_aprobadas")]
    pub approved_visits: i64,
    #[serde(rename = "visitas_completadas")]
    pub completed_visits: i64,
    #[serde(rename = "visitas_rechazadas")]
    pub rejected_visits: i64,
    #[serde(rename = "visitas_expiradas")]
    pub expired_visits: i64,
    #[serde(rename = "total_escaneos_hoy")]
    pub scans_today: i64,
    #[serde(rename = "escaneos_entrada_hoy")]
    pub entry_scans_today: i64,
    #[serde(rename = "escaneos_salida_hoy")]
    pub exit_scans_today: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusBreakdown {
    #[serde(rename = "estado")]
    pub status: String,
    #[serde(rename = "cantidad")]
    pub count: i64,
    #[serde(rename = "porcentaje")]
    pub percentage: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HourlyActivity {
    #[serde(rename = "hora")]
    pub hour: u8,
    #[serde(rename = "cantidad_entradas")]
    pub entries: i64,
    #[serde(rename = "cantidad_salidas")]
    pub exits: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuardActivity {
    #[serde(rename = "guardia_id")]
    pub guard_id: i64,
    #[serde(rename = "nombre_guardia")]
    pub guard_name: String,
    #[serde(rename = "total_escaneos")]
    pub total_scans: i64,
    #[serde(rename = "escaneos_entrada")]
    pub entry_scans: i64,
    #[serde(rename = "escaneos_salida")]
    pub exit_scans: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VehicleBreakdown {
    #[serde(rename = "tipo_vehiculo")]
    pub vehicle_type: String,
    #[serde(rename = "cantidad")]
    pub count: i64,
    #[serde(rename = "porcentaje")]
    pub percentage: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResidentActivity {
    #[serde(rename = "residente_id")]
    pub resident_id: i64,
    #[serde(rename = "nombre_residente")]
    pub resident_name: String,
    #[serde(rename = "unidad_residencial")]
    pub residential_unit: String,
    #[serde(rename = "total_visitas")]
    pub total_visits: i64,
}

/// Full statistics report returned by `/admin/estadisticas`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsReport {
    #[serde(rename = "fecha_consulta")]
    pub generated_at: DateTime<Utc>,
    #[serde(rename = "estadisticas_generales")]
    pub totals: StatsTotals,
    #[serde(rename = "estados_visitas")]
    pub by_status: Vec<StatusBreakdown>,
    #[serde(rename = "horarios_actividad")]
    pub by_hour: Vec<HourlyActivity>,
    #[serde(rename = "guardias_actividad")]
    pub by_guard: Vec<GuardActivity>,
    #[serde(rename = "vehiculos_frecuentes")]
    pub frequent_vehicles: Vec<VehicleBreakdown>,
    #[serde(rename = "residentes_activos")]
    pub active_residents: Vec<ResidentActivity>,
}
