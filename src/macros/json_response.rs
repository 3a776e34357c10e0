/// implement a json `Responder` for response structs.
///
/// the body is the serde_json representation of the value, served as `application/json`.
/// serialization failures end up as a 500.
macro_rules! json_response {
    ( $( $name:ty ),+ $(,)? ) => {
        $(
            impl<'r> rocket::response::Responder<'r, 'static> for $name {
                fn respond_to(self, request: &'r rocket::Request<'_>) -> rocket::response::Result<'static> {
                    let body = match serde_json::to_string(&self) {
                        Ok(body) => body,
                        Err(error) => {
                            log::error!(target:"macros/json_response", "Error serializing {}. (error: {})", stringify!($name), error);
                            return Err(rocket::http::Status::InternalServerError);
                        }
                    };

                    rocket::response::Response::build_from(rocket::response::Responder::respond_to(body, request)?)
                        .header(rocket::http::ContentType::JSON)
                        .ok()
                }
            }
        )+
    }
}

pub(crate) use json_response;
