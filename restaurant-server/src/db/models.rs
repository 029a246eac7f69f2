//! Database models
//!
//! Wire names are the Spanish ones the API has always served; struct
//! fields and table columns stay English. Money stays `f64` in REAL
//! columns; [`ser_amount`] keeps integral amounts as JSON integers.

use serde::{Deserialize, Serialize, Serializer};

// ========== Serialization Helpers ==========

/// Integral amounts serialize as JSON integers (16000, not 16000.0)
fn ser_amount<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if value.fract() == 0.0 && value.is_finite() && value.abs() < 9.0e15 {
        serializer.serialize_i64(*value as i64)
    } else {
        serializer.serialize_f64(*value)
    }
}

fn ser_opt_amount<S: Serializer>(value: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error> {
    match value {
        Some(v) => ser_amount(v, serializer),
        None => serializer.serialize_none(),
    }
}

// ========== Categories ==========

/// Category entity
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Category {
    pub id: i64,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "descripcion")]
    pub description: Option<String>,
    #[serde(rename = "fecha_creacion")]
    pub created_at: i64,
    #[serde(rename = "fecha_actualizacion")]
    pub updated_at: i64,
}

/// Create/update category payload (update is a full replacement)
#[derive(Debug, Clone, Deserialize)]
pub struct CategoryPayload {
    pub nombre: Option<String>,
    pub descripcion: Option<String>,
}

// ========== Dishes ==========

/// Dish entity
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Dish {
    pub id: i64,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "precio", serialize_with = "ser_amount")]
    pub price: f64,
    #[serde(rename = "descripcion")]
    pub description: String,
    #[serde(rename = "categoria_id")]
    pub category_id: Option<i64>,
    #[serde(rename = "fecha_creacion")]
    pub created_at: i64,
    #[serde(rename = "fecha_actualizacion")]
    pub updated_at: i64,
}

/// Create dish payload
#[derive(Debug, Clone, Deserialize)]
pub struct DishCreate {
    pub nombre: Option<String>,
    pub precio: Option<f64>,
    pub descripcion: Option<String>,
    pub categoria_id: Option<i64>,
}

/// Update dish payload
#[derive(Debug, Clone, Deserialize)]
pub struct DishUpdate {
    pub nombre: Option<String>,
    pub precio: Option<f64>,
    pub descripcion: Option<String>,
    pub categoria_id: Option<i64>,
}

impl DishUpdate {
    /// True when no updatable field was sent
    pub fn is_empty(&self) -> bool {
        self.nombre.is_none()
            && self.precio.is_none()
            && self.descripcion.is_none()
            && self.categoria_id.is_none()
    }
}

// ========== Orders ==========

/// Order lifecycle states, stored and served as Spanish words
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum OrderStatus {
    Pendiente,
    Preparando,
    Listo,
    Entregado,
    Cancelado,
}

impl OrderStatus {
    /// Accepted wire values: pendiente, preparando, listo, entregado, cancelado
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pendiente" => Some(Self::Pendiente),
            "preparando" => Some(Self::Preparando),
            "listo" => Some(Self::Listo),
            "entregado" => Some(Self::Entregado),
            "cancelado" => Some(Self::Cancelado),
            _ => None,
        }
    }
}

/// Order header
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Order {
    pub id: i64,
    #[serde(rename = "cliente")]
    pub customer: String,
    #[serde(rename = "mesa")]
    pub table_label: Option<String>,
    #[serde(rename = "estado")]
    pub status: OrderStatus,
    #[serde(serialize_with = "ser_amount")]
    pub total: f64,
    #[serde(rename = "fecha_creacion")]
    pub created_at: i64,
    #[serde(rename = "fecha_actualizacion")]
    pub updated_at: i64,
}

/// Order line joined with the current menu row
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct OrderItemDetail {
    pub id: i64,
    #[serde(rename = "orden_id")]
    pub order_id: i64,
    #[serde(rename = "plato_id")]
    pub dish_id: i64,
    #[serde(rename = "cantidad")]
    pub quantity: i64,
    /// Price captured when the order was placed
    #[serde(rename = "precio_unitario", serialize_with = "ser_amount")]
    pub unit_price: f64,
    #[serde(serialize_with = "ser_amount")]
    pub subtotal: f64,
    /// Null when the dish has since been removed from the menu
    #[serde(rename = "nombre_plato")]
    pub dish_name: Option<String>,
    /// Today's menu price, next to the snapshot
    #[serde(rename = "precio_actual", serialize_with = "ser_opt_amount")]
    pub current_price: Option<f64>,
}

/// Order header plus its lines
#[derive(Debug, Clone, Serialize)]
pub struct OrderDetail {
    #[serde(flatten)]
    pub order: Order,
    pub items: Vec<OrderItemDetail>,
}

/// A line item as sent by the client
#[derive(Debug, Clone, Deserialize)]
pub struct OrderItemPayload {
    #[serde(rename = "plato_id")]
    pub dish_id: Option<i64>,
    #[serde(rename = "cantidad")]
    pub quantity: Option<i64>,
}

/// `items` accepts either a list or a single bare item object
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ItemsPayload {
    Many(Vec<OrderItemPayload>),
    One(OrderItemPayload),
}

impl ItemsPayload {
    pub fn into_vec(self) -> Vec<OrderItemPayload> {
        match self {
            Self::Many(items) => items,
            Self::One(item) => vec![item],
        }
    }
}

/// Create order payload
#[derive(Debug, Clone, Deserialize)]
pub struct OrderCreate {
    pub cliente: Option<String>,
    pub mesa: Option<String>,
    pub items: Option<ItemsPayload>,
}

/// Update order payload (header fields are replaced, not merged)
#[derive(Debug, Clone, Deserialize)]
pub struct OrderUpdate {
    pub cliente: Option<String>,
    pub mesa: Option<String>,
    pub estado: Option<String>,
    pub items: Option<ItemsPayload>,
}

/// Validated order line ready for the repository
#[derive(Debug, Clone)]
pub struct OrderItemInput {
    pub dish_id: i64,
    pub quantity: Option<i64>,
}
