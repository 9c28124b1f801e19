use serde::Deserialize;

use application::transfer::{LoginDto, RegisterUserDto};

use crate::controller::Intake;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    name: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
}

pub struct Transformer;

impl Intake<RegisterRequest> for Transformer {
    type To = RegisterUserDto;
    fn emit(&self, input: RegisterRequest) -> Self::To {
        RegisterUserDto {
            name: input.name,
            email: input.email,
            password: input.password,
        }
    }
}

impl Intake<LoginRequest> for Transformer {
    type To = LoginDto;
    fn emit(&self, input: LoginRequest) -> Self::To {
        LoginDto {
            email: input.email,
            password: input.password,
        }
    }
}
