//! Mojang profile lookup and the Hypixel skyblock bazaar.

use std::collections::HashMap;

use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const MOJANG_API: &str = "https://api.mojang.com";
pub const HYPIXEL_API: &str = "https://api.hypixel.net";

#[derive(Error, Debug)]
pub enum MinecraftError {
    #[error("That is not a valid minecraft username!")]
    UnknownPlayer,

    #[error("Your item was not found!")]
    UnknownItem,

    #[error("The bazaar data has not yet been populated and should be available shortly.")]
    NotReady,

    #[error("Something went wrong, the API returned {0}.")]
    Status(StatusCode),

    #[error("API communication failure: {0}")]
    Api(#[from] reqwest::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    pub name: String,
}

impl Profile {
    pub fn avatar_url(&self) -> String {
        format!("https://crafatar.com/avatars/{}?size=128&overlay=true", self.id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuickStatus {
    pub product_id: String,
    pub sell_price: f64,
    pub sell_volume: u64,
    pub sell_orders: u64,
    pub sell_moving_week: u64,
    pub buy_price: f64,
    pub buy_volume: u64,
    pub buy_orders: u64,
    pub buy_moving_week: u64,
}

#[derive(Debug, Deserialize)]
struct Product {
    quick_status: QuickStatus,
}

#[derive(Debug, Deserialize)]
struct Bazaar {
    products: HashMap<String, Product>,
}

/// Bazaar product ids are upper snake case; users may type them any way.
pub fn product_id(item: &str) -> String {
    item.trim().to_uppercase().replace(' ', "_")
}

pub async fn profile(client: &Client, base_url: &str, username: &str) -> Result<Profile, MinecraftError> {
    let response = client
        .get(format!("{base_url}/users/profiles/minecraft/{}", username.trim()))
        .send()
        .await?;

    match response.status() {
        StatusCode::OK => Ok(response.json().await?),
        StatusCode::NO_CONTENT | StatusCode::NOT_FOUND => Err(MinecraftError::UnknownPlayer),
        status => Err(MinecraftError::Status(status)),
    }
}

pub async fn bazaar_item(client: &Client, base_url: &str, item: &str) -> Result<QuickStatus, MinecraftError> {
    let response = client.get(format!("{base_url}/skyblock/bazaar")).send().await?;

    match response.status() {
        StatusCode::OK => {}
        StatusCode::SERVICE_UNAVAILABLE => return Err(MinecraftError::NotReady),
        status => return Err(MinecraftError::Status(status)),
    }

    let mut bazaar: Bazaar = response.json().await?;
    bazaar
        .products
        .remove(&product_id(item))
        .map(|product| product.quick_status)
        .ok_or(MinecraftError::UnknownItem)
}
