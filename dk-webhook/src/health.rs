use rocket::http::Status;

#[rocket::get("/livez")]
pub fn livez() -> Status {
    Status::Ok
}

#[rocket::get("/readyz")]
pub fn readyz() -> Status {
    Status::Ok
}
