//! Error conversion glue between layers.
//!
//! The domain layer must not depend on service/repository error types, so the
//! `From` impls connecting them live here.

use crate::domain::types::TypeConstraintError;
use crate::repository::RepositoryError;

impl From<TypeConstraintError> for RepositoryError {
    fn from(val: TypeConstraintError) -> Self {
        RepositoryError::ValidationError(val.to_string())
    }
}

#[cfg(feature = "server")]
mod server {
    use crate::domain::types::TypeConstraintError;
    use crate::dto::products::ProductRequestError;
    use crate::forms::categories::AddCategoryFormError;
    use crate::forms::products::ProductFormError;
    use crate::services::ServiceError;

    impl From<TypeConstraintError> for ServiceError {
        fn from(val: TypeConstraintError) -> Self {
            ServiceError::TypeConstraint(val.to_string())
        }
    }

    impl From<ProductRequestError> for ServiceError {
        fn from(val: ProductRequestError) -> Self {
            ServiceError::Form(val.to_string())
        }
    }

    impl From<ProductFormError> for ServiceError {
        fn from(val: ProductFormError) -> Self {
            ServiceError::Form(val.to_string())
        }
    }

    impl From<AddCategoryFormError> for ServiceError {
        fn from(val: AddCategoryFormError) -> Self {
            ServiceError::Form(val.to_string())
        }
    }
}
