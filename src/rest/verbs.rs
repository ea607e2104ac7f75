use reqwest::Method;
use serde::de::DeserializeOwned;

use crate::config::RequestOptions;
use crate::error::Result;
use crate::path::{format_path, PathSpec};
use crate::query::QueryParams;
use crate::rest::{Response, RestClient};

impl RestClient {
    /// GET `path`, with `params` encoded into the query string. Sends no body.
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: impl Into<PathSpec>,
        params: Option<&QueryParams>,
        options: Option<&RequestOptions>,
    ) -> Result<Response<T>> {
        let query = params.map(QueryParams::encode);
        let path = format_path(&path.into(), query.as_deref());
        self.dispatch(path, Method::GET, None, options).await
    }

    /// POST a pre-serialized body to `path`.
    pub async fn post<T: DeserializeOwned>(
        &self,
        path: impl Into<PathSpec>,
        body: Option<&str>,
        options: Option<&RequestOptions>,
    ) -> Result<Response<T>> {
        self.send(Method::POST, path.into(), body, options).await
    }

    /// PUT a pre-serialized body to `path`.
    pub async fn put<T: DeserializeOwned>(
        &self,
        path: impl Into<PathSpec>,
        body: Option<&str>,
        options: Option<&RequestOptions>,
    ) -> Result<Response<T>> {
        self.send(Method::PUT, path.into(), body, options).await
    }

    /// DELETE `path`, optionally with a pre-serialized body.
    pub async fn delete<T: DeserializeOwned>(
        &self,
        path: impl Into<PathSpec>,
        body: Option<&str>,
        options: Option<&RequestOptions>,
    ) -> Result<Response<T>> {
        self.send(Method::DELETE, path.into(), body, options).await
    }

    async fn send<T: DeserializeOwned>(
        &self,
        method: Method,
        path: PathSpec,
        body: Option<&str>,
        options: Option<&RequestOptions>,
    ) -> Result<Response<T>> {
        let path = format_path(&path, None);
        self.dispatch(path, method, body.map(str::to_string), options)
            .await
    }
}
