//! # 싱글톤 서비스 레지스트리
//!
//! `singleton_macro`의 `#[service]` / `#[repository]` 매크로가 생성한 등록 정보를
//! `inventory`로 수집하고, 타입별 싱글톤 인스턴스를 보관합니다.
//!
//! ```text
//! main
//!  ├─ ServiceLocator::set(Arc<Database>)        인프라 수동 등록
//!  ├─ ServiceLocator::set(Arc<RedisClient>)
//!  ├─ ServiceLocator::set(Arc<ObjectStorage>)
//!  └─ ServiceLocator::initialize_all()          리포지토리 → 서비스 순서로 생성
//!
//! handler
//!  └─ PostService::instance()                   == ServiceLocator::get::<PostService>()
//! ```
//!
//! 인스턴스 조회는 타입 이름 규칙을 따릅니다. `PostRepository`는 `"post"`로 등록된
//! 리포지토리, `MediaService`는 `"media"`로 등록된 서비스를 찾습니다.
//! 생성 중인 타입을 다시 요청하면 순환 의존성으로 보고 panic 합니다.

use std::any::{Any, TypeId};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, PoisonError, RwLock};
use async_trait::async_trait;
use log::{debug, info};
use once_cell::sync::Lazy;

#[async_trait]
pub trait Service: Send + Sync {
    fn name(&self) -> &str;

    async fn init(&self) -> Result<(), Box<dyn std::error::Error>>;
}

#[async_trait]
pub trait Repository: Send + Sync {
    fn name(&self) -> &str;

    fn collection_name(&self) -> &str;

    async fn init(&self) -> Result<(), Box<dyn std::error::Error>>;
}

/// `#[service]` 매크로가 생성하는 등록 정보
pub struct ServiceRegistration {
    pub name: &'static str,
    pub constructor: fn() -> Box<dyn Any + Send + Sync>,
}

/// `#[repository]` 매크로가 생성하는 등록 정보
pub struct RepositoryRegistration {
    pub name: &'static str,
    pub constructor: fn() -> Box<dyn Any + Send + Sync>,
}

inventory::collect!(ServiceRegistration);
inventory::collect!(RepositoryRegistration);

static SERVICE_NAME_CACHE: Lazy<HashMap<String, &'static ServiceRegistration>> = Lazy::new(|| {
    let cache: HashMap<_, _> = inventory::iter::<ServiceRegistration>()
        .map(|registration| (registration_key(registration.name), registration))
        .collect();

    debug!("Service 이름 캐시 초기화: {}개", cache.len());
    cache
});

static REPOSITORY_NAME_CACHE: Lazy<HashMap<String, &'static RepositoryRegistration>> = Lazy::new(|| {
    let cache: HashMap<_, _> = inventory::iter::<RepositoryRegistration>()
        .map(|registration| (registration_key(registration.name), registration))
        .collect();

    debug!("Repository 이름 캐시 초기화: {}개", cache.len());
    cache
});

/// 등록 이름에서 `_service` / `_repository` 접미사를 뗀 조회 키
fn registration_key(name: &str) -> String {
    name.strip_suffix("_service")
        .or_else(|| name.strip_suffix("_repository"))
        .unwrap_or(name)
        .to_lowercase()
}

/// `social_media_backend::services::posts::PostService` → `PostService`
fn short_type_name(type_name: &str) -> &str {
    type_name.rsplit("::").next().unwrap_or(type_name)
}

/// 타입 이름으로 찾을 등록 종류와 키
#[derive(Debug, PartialEq)]
enum Lookup {
    Repository(String),
    Service(String),
    Unknown,
}

fn lookup_for(type_name: &str) -> Lookup {
    let short = short_type_name(type_name);

    if let Some(entity) = short.strip_suffix("Repository") {
        Lookup::Repository(entity.to_lowercase())
    } else if let Some(entity) = short.strip_suffix("Service") {
        Lookup::Service(entity.to_lowercase())
    } else {
        Lookup::Unknown
    }
}

pub struct ServiceLocator {
    instances: RwLock<HashMap<TypeId, Arc<dyn Any + Send + Sync>>>,
    initializing: RwLock<HashSet<TypeId>>,
}

static LOCATOR: Lazy<ServiceLocator> = Lazy::new(ServiceLocator::new);

impl ServiceLocator {
    fn new() -> Self {
        Self {
            instances: RwLock::new(HashMap::new()),
            initializing: RwLock::new(HashSet::new()),
        }
    }

    fn cached<T: 'static + Send + Sync>() -> Option<Arc<T>> {
        LOCATOR
            .instances
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&TypeId::of::<T>())
            .cloned()
            .and_then(|instance| instance.downcast::<T>().ok())
    }

    /// 타입 `T`의 싱글톤을 반환합니다. 없으면 등록 정보로 생성합니다.
    ///
    /// # Panics
    ///
    /// 등록되지 않은 타입이거나 순환 의존성이 있으면 panic 합니다.
    /// 애플리케이션 시작 단계(`initialize_all`)에서 드러나는 구성 오류입니다.
    pub fn get<T: 'static + Send + Sync>() -> Arc<T> {
        if let Some(instance) = Self::cached::<T>() {
            return instance;
        }

        let type_id = TypeId::of::<T>();
        let type_name = std::any::type_name::<T>();

        {
            let mut initializing = LOCATOR
                .initializing
                .write()
                .unwrap_or_else(PoisonError::into_inner);
            if !initializing.insert(type_id) {
                panic!("Circular dependency detected: {} is already being initialized", type_name);
            }
        }

        // 생성자가 다른 의존성을 get()으로 요청하므로 instances 락을 잡지 않은 채 생성한다
        let boxed = match lookup_for(type_name) {
            Lookup::Repository(entity) => REPOSITORY_NAME_CACHE
                .get(&entity)
                .map(|registration| (registration.constructor)()),
            Lookup::Service(entity) => SERVICE_NAME_CACHE
                .get(&entity)
                .map(|registration| (registration.constructor)()),
            Lookup::Unknown => None,
        };

        LOCATOR
            .initializing
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&type_id);

        let Some(boxed) = boxed else {
            panic!(
                "Service not found: {}. Register it with #[service] / #[repository] or ServiceLocator::set()",
                type_name
            );
        };

        let instance = match boxed.downcast::<Arc<T>>() {
            Ok(arc) => *arc,
            Err(_) => panic!("Type mismatch while creating {}", type_name),
        };

        // 다른 스레드가 먼저 넣었다면 그 인스턴스를 사용
        let mut instances = LOCATOR.instances.write().unwrap_or_else(PoisonError::into_inner);
        let stored = instances
            .entry(type_id)
            .or_insert_with(|| instance.clone() as Arc<dyn Any + Send + Sync>)
            .clone();

        stored.downcast::<T>().unwrap_or(instance)
    }

    /// 매크로로 만들 수 없는 인프라 인스턴스를 직접 등록합니다.
    pub fn set<T: 'static + Send + Sync>(instance: Arc<T>) {
        let type_name = std::any::type_name::<T>();
        info!("📦 Registering: {}", short_type_name(type_name));

        LOCATOR
            .instances
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(TypeId::of::<T>(), instance as Arc<dyn Any + Send + Sync>);
    }

    /// 등록된 모든 리포지토리와 서비스를 미리 생성합니다.
    ///
    /// 인프라(`set`)를 모두 등록한 뒤 호출해야 합니다.
    pub async fn initialize_all() -> Result<(), Box<dyn std::error::Error>> {
        info!("🔄 서비스 레지스트리 초기화 시작");

        let mut repo_count = 0;
        for registration in inventory::iter::<RepositoryRegistration>() {
            let _ = (registration.constructor)();
            debug!("  ✓ repository: {}", registration.name);
            repo_count += 1;
        }

        let mut service_count = 0;
        for registration in inventory::iter::<ServiceRegistration>() {
            let _ = (registration.constructor)();
            debug!("  ✓ service: {}", registration.name);
            service_count += 1;
        }

        info!(
            "✅ 레지스트리 초기화 완료: repository {}개, service {}개",
            repo_count, service_count
        );
        Ok(())
    }
}
