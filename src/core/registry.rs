//! # 컴포넌트 레지스트리
//!
//! `#[service]` / `#[repository]` 매크로가 생성하는 등록 정보를 `inventory`로 수집하고,
//! 타입 기반으로 싱글톤 인스턴스를 찾아주는 `ServiceLocator`를 제공합니다.
//!
//! ## 조회 규칙
//!
//! ```text
//! ServiceLocator::get::<T>()
//!   ├─ set()으로 직접 등록된 인스턴스가 있으면 그대로 반환 (Database, RedisClient, AuthSettings)
//!   ├─ 타입 이름이 ...Repository → "<소문자 접두어>_repository" 등록 정보로 생성
//!   ├─ 타입 이름이 ...Service    → "<소문자 접두어>_service" 등록 정보로 생성
//!   └─ 그 외 → panic (부팅 시점의 배선 오류)
//! ```
//!
//! 따라서 매크로의 `name` 인자는 타입 이름에서 접미사를 뺀 소문자 문자열과 같아야 합니다.
//! 예: `PostRepository` → `#[repository(name = "post")]`, `GoogleAuthService` → `#[service(name = "googleauth")]`.

use std::any::{Any, TypeId};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use once_cell::sync::Lazy;

use crate::utils::display_terminal::{
    print_boxed_title, print_cache_initialized, print_final_summary, print_step_complete,
    print_step_start, print_sub_task,
};

/// 비즈니스 로직 컴포넌트 (`#[service]`가 구현)
#[async_trait]
pub trait Service: Send + Sync {
    fn name(&self) -> &str;

    async fn init(&self) -> Result<(), Box<dyn std::error::Error>>;
}

/// 데이터 접근 컴포넌트 (`#[repository]`가 구현)
#[async_trait]
pub trait Repository: Send + Sync {
    fn name(&self) -> &str;

    fn collection_name(&self) -> &str;

    async fn init(&self) -> Result<(), Box<dyn std::error::Error>>;
}

pub struct ServiceRegistration {
    pub name: &'static str,
    pub constructor: fn() -> Box<dyn Any + Send + Sync>,
}

pub struct RepositoryRegistration {
    pub name: &'static str,
    pub constructor: fn() -> Box<dyn Any + Send + Sync>,
}

inventory::collect!(ServiceRegistration);
inventory::collect!(RepositoryRegistration);

type Constructor = fn() -> Box<dyn Any + Send + Sync>;

static SERVICE_CONSTRUCTORS: Lazy<HashMap<String, (&'static str, Constructor)>> = Lazy::new(|| {
    let cache: HashMap<_, _> = inventory::iter::<ServiceRegistration>()
        .map(|r| (strip_kind_suffix(r.name), (r.name, r.constructor)))
        .collect();
    print_cache_initialized("Service", cache.len());
    cache
});

static REPOSITORY_CONSTRUCTORS: Lazy<HashMap<String, (&'static str, Constructor)>> = Lazy::new(|| {
    let cache: HashMap<_, _> = inventory::iter::<RepositoryRegistration>()
        .map(|r| (strip_kind_suffix(r.name), (r.name, r.constructor)))
        .collect();
    print_cache_initialized("Repository", cache.len());
    cache
});

/// `"post_repository"` → `"post"`, `"token_service"` → `"token"`
fn strip_kind_suffix(name: &str) -> String {
    name.strip_suffix("_service")
        .or_else(|| name.strip_suffix("_repository"))
        .unwrap_or(name)
        .to_string()
}

/// `"game_social_backend::services::auth::TokenService"` → `"TokenService"`
fn short_type_name(type_name: &str) -> &str {
    type_name.rsplit("::").next().unwrap_or(type_name)
}

/// 타입 이름으로부터 (레지스트리, 조회 키)를 결정합니다.
fn registry_lookup(short_name: &str) -> Option<(&'static Lazy<HashMap<String, (&'static str, Constructor)>>, String)> {
    if let Some(prefix) = short_name.strip_suffix("Repository") {
        return Some((&REPOSITORY_CONSTRUCTORS, prefix.to_lowercase()));
    }
    if let Some(prefix) = short_name.strip_suffix("Service") {
        return Some((&SERVICE_CONSTRUCTORS, prefix.to_lowercase()));
    }
    None
}

pub struct ServiceLocator {
    instances: RwLock<HashMap<TypeId, Arc<dyn Any + Send + Sync>>>,
    initializing: RwLock<HashSet<TypeId>>,
}

static LOCATOR: Lazy<ServiceLocator> = Lazy::new(|| ServiceLocator {
    instances: RwLock::new(HashMap::new()),
    initializing: RwLock::new(HashSet::new()),
});

impl ServiceLocator {
    fn read_instances(&self) -> RwLockReadGuard<'_, HashMap<TypeId, Arc<dyn Any + Send + Sync>>> {
        self.instances.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write_instances(&self) -> RwLockWriteGuard<'_, HashMap<TypeId, Arc<dyn Any + Send + Sync>>> {
        self.instances.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn initializing(&self) -> RwLockWriteGuard<'_, HashSet<TypeId>> {
        self.initializing.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// 등록된 싱글톤을 반환합니다. 없으면 매크로 등록 정보로 생성합니다.
    ///
    /// # Panics
    ///
    /// 순환 의존성, 미등록 타입, 타입 불일치는 모두 부팅 시점의 배선 오류이므로 panic 합니다.
    pub fn get<T: 'static + Send + Sync>() -> Arc<T> {
        if let Some(instance) = Self::try_get::<T>() {
            return instance;
        }

        let type_id = TypeId::of::<T>();
        let type_name = std::any::type_name::<T>();

        if !LOCATOR.initializing().insert(type_id) {
            log::error!("순환 의존성 감지: {}", type_name);
            panic!("Circular dependency detected: {} is already being initialized", type_name);
        }

        let created = Self::construct::<T>(type_name);
        LOCATOR.initializing().remove(&type_id);

        match created {
            Ok(instance) => {
                // 생성 도중 다른 경로로 등록되었다면 먼저 등록된 쪽을 유지
                let mut instances = LOCATOR.write_instances();
                let entry = instances
                    .entry(type_id)
                    .or_insert_with(|| instance.clone() as Arc<dyn Any + Send + Sync>)
                    .clone();
                drop(instances);
                entry.downcast::<T>().unwrap_or(instance)
            }
            Err(message) => {
                log::error!("{}", message);
                panic!("{}", message);
            }
        }
    }

    /// 이미 만들어진 인스턴스만 조회합니다. 생성은 하지 않습니다.
    pub fn try_get<T: 'static + Send + Sync>() -> Option<Arc<T>> {
        LOCATOR
            .read_instances()
            .get(&TypeId::of::<T>())
            .cloned()
            .and_then(|instance| instance.downcast::<T>().ok())
    }

    fn construct<T: 'static + Send + Sync>(type_name: &str) -> Result<Arc<T>, String> {
        let short_name = short_type_name(type_name);
        let (registry, key) = registry_lookup(short_name).ok_or_else(|| {
            format!(
                "Component not found: {}. Register it with #[service]/#[repository] or ServiceLocator::set()",
                type_name
            )
        })?;

        let (registered_name, constructor) = registry
            .get(&key)
            .copied()
            .ok_or_else(|| format!("No component registered under '{}' for {}", key, type_name))?;

        // 매크로 생성자는 Box<Arc<T>>를 돌려준다
        constructor()
            .downcast::<Arc<T>>()
            .map(|boxed| *boxed)
            .map_err(|_| format!("Type mismatch for component '{}' ({})", registered_name, type_name))
    }

    /// 매크로로 만들 수 없는 인프라 객체를 등록합니다.
    pub fn set<T: 'static + Send + Sync>(instance: Arc<T>) {
        let type_name = std::any::type_name::<T>();
        print_sub_task(short_type_name(type_name), "registered");

        LOCATOR
            .write_instances()
            .insert(TypeId::of::<T>(), instance as Arc<dyn Any + Send + Sync>);
    }

    /// 모든 리포지토리 → 서비스 순으로 인스턴스를 미리 생성합니다.
    ///
    /// 요청 처리 중 첫 생성 비용이나 배선 오류가 발생하지 않도록 서버 시작 전에 호출합니다.
    pub async fn initialize_all() -> Result<(), Box<dyn std::error::Error>> {
        print_boxed_title("INITIALIZING SERVICE REGISTRY");

        let repositories: Vec<_> = inventory::iter::<RepositoryRegistration>().collect();
        if !repositories.is_empty() {
            print_step_start(1, "Creating repository instances");
            for registration in &repositories {
                let _ = (registration.constructor)();
                print_sub_task(registration.name, "created");
            }
            print_step_complete(1, "Repository instances created", repositories.len());
        }

        let services: Vec<_> = inventory::iter::<ServiceRegistration>().collect();
        if !services.is_empty() {
            print_step_start(2, "Creating service instances");
            for registration in &services {
                let _ = (registration.constructor)();
                print_sub_task(registration.name, "created");
            }
            print_step_complete(2, "Service instances created", services.len());
        }

        print_final_summary(repositories.len(), services.len());
        Ok(())
    }
}
