/*

Copyright 2025 Lealt

Licensed under the Apache License, Version 2.0 (the "License");
you may not use this file except in compliance with the License.
You may obtain a copy of the License at

    http://www.apache.org/licenses/LICENSE-2.0

Unless required by applicable law or agreed to in writing, software
distributed under the License is distributed on an "AS IS" BASIS,
WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
See the License for the specific language governing permissions and
limitations under the License.

*/

use dotenvy::dotenv;

mod app;
mod commands;
mod constants;
mod database;
mod env;
mod functions;

pub use app::{Data, Error};

#[tokio::main]
async fn main() -> Result<(), app::Error> {
    dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let config = app::load_config()?;
    let data = app::build_data(config).await?;
    app::run_client(data).await
}
