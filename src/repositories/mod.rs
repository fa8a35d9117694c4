//! # Repository Layer
//!
//! 저장소 포트(trait)와 그 구현체입니다.
//! 서비스 계층은 구체 타입이 아닌 `Arc<dyn PrincipalStore>` / `Arc<dyn CollectionStore>`를
//! 생성자로 주입받습니다.
//!
//! | 포트 | MongoDB 구현 | 메모리 구현 |
//! |------|--------------|-------------|
//! | [`PrincipalStore`] | [`MongoPrincipalStore`] | [`InMemoryPrincipalStore`] |
//! | [`CollectionStore`] | [`MongoRecordStore`] | [`InMemoryRecordStore`] |

pub mod principals;
pub mod records;

pub use principals::*;
pub use records::*;
