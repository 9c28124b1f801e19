use error_stack::Report;
use serde::Deserialize;
use uuid::Uuid;

use application::transfer::{CreateReviewDto, DeleteReviewDto, GetBookReviewsDto, UpdateReviewDto};
use kernel::KernelError;

use crate::controller::{Intake, TryIntake};

#[derive(Debug, Deserialize)]
pub struct CreateRequest {
    book_id: Option<String>,
    rating: i32,
    #[serde(default)]
    comment: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateRequest {
    rating: Option<i32>,
    comment: Option<String>,
}

#[derive(Debug)]
pub struct GetByBookRequest {
    book_id: Uuid,
}

impl GetByBookRequest {
    pub fn new(book_id: Uuid) -> Self {
        Self { book_id }
    }
}

#[derive(Debug)]
pub struct DeleteRequest {
    id: Uuid,
}

impl DeleteRequest {
    pub fn new(id: Uuid) -> Self {
        Self { id }
    }
}

pub struct Transformer;

/// The referenced book is looked up, so an unreadable id is a missing book.
impl TryIntake<CreateRequest> for Transformer {
    type To = CreateReviewDto;
    type Error = Report<KernelError>;
    fn emit(&self, input: CreateRequest) -> Result<Self::To, Self::Error> {
        let book_id = input.book_id.ok_or_else(|| {
            Report::new(KernelError::Validation).attach_printable("book_id is required")
        })?;
        let book_id = Uuid::parse_str(&book_id).map_err(|_| {
            Report::new(KernelError::NotFound).attach_printable("Invalid book ID")
        })?;
        Ok(CreateReviewDto {
            book_id,
            rating: input.rating,
            comment: input.comment,
        })
    }
}

impl Intake<(Uuid, UpdateRequest)> for Transformer {
    type To = UpdateReviewDto;
    fn emit(&self, input: (Uuid, UpdateRequest)) -> Self::To {
        let (id, input) = input;
        UpdateReviewDto {
            id,
            rating: input.rating,
            comment: input.comment,
        }
    }
}

impl Intake<GetByBookRequest> for Transformer {
    type To = GetBookReviewsDto;
    fn emit(&self, input: GetByBookRequest) -> Self::To {
        GetBookReviewsDto {
            book_id: input.book_id,
        }
    }
}

impl Intake<DeleteRequest> for Transformer {
    type To = DeleteReviewDto;
    fn emit(&self, input: DeleteRequest) -> Self::To {
        DeleteReviewDto { id: input.id }
    }
}

#[cfg(test)]
mod test {
    use kernel::KernelError;
    use serde_json::json;
    use uuid::Uuid;

    use super::{CreateRequest, Transformer};
    use crate::controller::TryIntake;

    fn create(body: serde_json::Value) -> CreateRequest {
        serde_json::from_value(body).unwrap()
    }

    fn refused(body: serde_json::Value) -> KernelError {
        match Transformer.emit(create(body)) {
            Ok(_) => panic!("request should have been refused"),
            Err(report) => *report.current_context(),
        }
    }

    #[test]
    fn unreadable_book_id_is_not_found() {
        let kind = refused(json!({ "book_id": "not-a-uuid", "rating": 3 }));
        assert_eq!(kind, KernelError::NotFound);
    }

    #[test]
    fn missing_book_id_is_invalid() {
        let kind = refused(json!({ "rating": 3 }));
        assert_eq!(kind, KernelError::Validation);
    }

    #[test]
    fn well_formed_request_passes_through() {
        let id = Uuid::new_v4();
        let Ok(dto) = Transformer.emit(create(json!({ "book_id": id.to_string(), "rating": 5 })))
        else {
            panic!("request should have been accepted");
        };
        assert_eq!(dto.book_id, id);
        assert_eq!(dto.rating, 5);
        assert!(dto.comment.is_empty());
    }
}
