use rocket::get;
use serde::Serialize;

use crate::macros::json_response::json_response;

#[derive(Serialize, Debug, Clone)]
pub struct Welcome {
    pub message: String,
}

json_response!(Welcome);

#[get("/")]
pub fn index() -> Welcome {
    Welcome {
        message: "Welcome to the Formula 1 data API".to_string(),
    }
}
