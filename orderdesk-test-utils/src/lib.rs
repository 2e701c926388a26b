pub mod builder;
pub mod constant;
pub mod context;
pub mod error;
pub mod fixtures;
pub mod model;

pub use builder::TestBuilder;
pub use context::TestContext;
pub use error::TestError;

pub mod prelude {
    pub use crate::{
        fixtures::{
            order::{factory, MockOrder},
            sheet::SheetFixture,
        },
        test_setup_with_tables, TestBuilder, TestContext, TestError,
    };
}
