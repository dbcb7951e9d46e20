#![allow(dead_code)]

use std::collections::HashMap;
use std::net::IpAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use ipinfo_geoip::cache::{CacheClient, HashStore};
use ipinfo_geoip::errors::{IpInfoError, Result};
use ipinfo_geoip::services::geoip::{CityResponse, CountryRecord, TraitsRecord};
use ipinfo_geoip::services::{GeoIpClient, GeoIpSource, Resolver, SourceReply};
use serde_json::{Value, json};

pub const TEST_TTL: u64 = 3600;

// 模拟 Redis 存储，用于测试
#[derive(Default)]
pub struct MockStore {
    data: Mutex<HashMap<String, HashMap<String, String>>>,
    ttls: Mutex<HashMap<String, u64>>,
    reads: AtomicUsize,
    writes: AtomicUsize,
    should_fail: Mutex<bool>,
}

impl MockStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn set_should_fail(&self, fail: bool) {
        *self.should_fail.lock().unwrap() = fail;
    }

    pub fn insert_raw(&self, key: &str, fields: &[(&str, &str)]) {
        let hash = fields
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        self.data.lock().unwrap().insert(key.to_string(), hash);
    }

    pub fn stored(&self, key: &str) -> Option<HashMap<String, String>> {
        self.data.lock().unwrap().get(key).cloned()
    }

    pub fn ttl(&self, key: &str) -> Option<u64> {
        self.ttls.lock().unwrap().get(key).copied()
    }

    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl HashStore for MockStore {
    async fn read_hash(&self, key: &str) -> Result<HashMap<String, String>> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        if *self.should_fail.lock().unwrap() {
            return Err(IpInfoError::cache(
                "Redis connection error: connection refused",
            ));
        }
        let data = self.data.lock().unwrap();
        Ok(data.get(key).cloned().unwrap_or_default())
    }

    async fn write_hash(&self, key: &str, fields: &[(&str, &str)], ttl_secs: u64) -> Result<()> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        if *self.should_fail.lock().unwrap() {
            return Err(IpInfoError::cache(
                "Redis connection error: connection refused",
            ));
        }
        self.insert_raw(key, fields);
        self.ttls.lock().unwrap().insert(key.to_string(), ttl_secs);
        Ok(())
    }

    fn name(&self) -> &'static str {
        "Mock"
    }
}

// 模拟 GeoIP 服务
pub struct MockSource {
    reply: Mutex<Result<SourceReply>>,
    calls: AtomicUsize,
    delay: Mutex<Option<Duration>>,
}

impl MockSource {
    pub fn new(reply: Result<SourceReply>) -> Arc<Self> {
        Arc::new(Self {
            reply: Mutex::new(reply),
            calls: AtomicUsize::new(0),
            delay: Mutex::new(None),
        })
    }

    pub fn set_reply(&self, reply: Result<SourceReply>) {
        *self.reply.lock().unwrap() = reply;
    }

    pub fn set_delay(&self, delay: Duration) {
        *self.delay.lock().unwrap() = Some(delay);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl GeoIpSource for MockSource {
    async fn city(&self, _ip: IpAddr) -> Result<SourceReply> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let delay = *self.delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        self.reply.lock().unwrap().clone()
    }

    fn name(&self) -> &'static str {
        "Mock"
    }
}

pub fn city_reply(network: Value, asn: Value, country: Value, org: Value) -> SourceReply {
    SourceReply::Found(CityResponse {
        country: CountryRecord { iso_code: country },
        traits: TraitsRecord {
            network,
            autonomous_system_number: asn,
            autonomous_system_organization: org,
        },
    })
}

pub fn google_reply() -> SourceReply {
    city_reply(
        json!("8.8.8.0/24"),
        json!(15169),
        json!("US"),
        json!("Google LLC"),
    )
}

pub fn cache_client(store: &Arc<MockStore>) -> CacheClient {
    CacheClient::new(store.clone(), TEST_TTL).unwrap()
}

pub fn geoip_client(source: &Arc<MockSource>) -> GeoIpClient {
    GeoIpClient::new(source.clone())
}

pub fn resolver(store: &Arc<MockStore>, source: &Arc<MockSource>) -> Resolver {
    Resolver::new(cache_client(store), geoip_client(source))
}
