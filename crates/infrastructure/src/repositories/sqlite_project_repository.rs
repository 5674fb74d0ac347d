use crate::database::{project_likes, projects, run_blocking, SqlitePool, StoreOp};
use async_trait::async_trait;
use chrono::NaiveDateTime;
use diesel::prelude::*;
use diesel::sqlite::Sqlite;
use domain::{DomainError, LikeStatus, Project, ProjectQuery, ProjectRepository};
use std::collections::HashMap;

// Database model - separate from domain entity
#[derive(Queryable, Selectable, Debug)]
#[diesel(table_name = projects)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
struct ProjectModel {
    #[allow(dead_code)]
    seq: i64,
    id: String,
    title: String,
    description: String,
    poster_image: String,
    github_url: String,
    website_url: String,
    category: String,
    author_id: String,
    likes: i64,
    created_at: NaiveDateTime,
    updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = projects)]
struct NewProjectModel {
    id: String,
    title: String,
    description: String,
    poster_image: String,
    github_url: String,
    website_url: String,
    category: String,
    author_id: String,
    likes: i64,
    created_at: NaiveDateTime,
    updated_at: NaiveDateTime,
}

impl ProjectModel {
    fn into_project(self, liked_by: Vec<String>) -> Result<Project, DomainError> {
        let category = self.category.parse().map_err(|_| {
            DomainError::QueryFailure(format!(
                "project {} has unknown category {:?}",
                self.id, self.category
            ))
        })?;

        Ok(Project {
            id: self.id,
            title: self.title,
            description: self.description,
            poster_image: self.poster_image,
            github_url: self.github_url,
            website_url: self.website_url,
            category,
            author_id: self.author_id,
            likes: to_like_count(self.likes),
            liked_by,
            created_at: self.created_at.and_utc(),
            updated_at: self.updated_at.and_utc(),
        })
    }
}

impl From<&Project> for NewProjectModel {
    fn from(project: &Project) -> Self {
        NewProjectModel {
            id: project.id.clone(),
            title: project.title.clone(),
            description: project.description.clone(),
            poster_image: project.poster_image.clone(),
            github_url: project.github_url.clone(),
            website_url: project.website_url.clone(),
            category: project.category.label().to_string(),
            author_id: project.author_id.clone(),
            likes: i64::from(project.likes),
            created_at: project.created_at.naive_utc(),
            updated_at: project.updated_at.naive_utc(),
        }
    }
}

fn to_like_count(likes: i64) -> u32 {
    u32::try_from(likes.max(0)).unwrap_or(u32::MAX)
}

/// `LIKE` pattern matching `text` anywhere, with wildcards in `text` escaped.
fn contains_pattern(text: &str) -> String {
    let mut pattern = String::with_capacity(text.len() + 2);
    pattern.push('%');
    for c in text.chars() {
        if matches!(c, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

fn filtered(query: &ProjectQuery) -> projects::BoxedQuery<'static, Sqlite> {
    let base = projects::table.into_boxed();
    match query {
        ProjectQuery::All => base,
        ProjectQuery::Category(label) => base.filter(projects::category.eq(label.clone())),
        ProjectQuery::TitleContains(text) => {
            base.filter(projects::title.like(contains_pattern(text)).escape('\\'))
        }
        ProjectQuery::Author(author_id) => base.filter(projects::author_id.eq(author_id.clone())),
    }
}

/// Pairs each model with its likers, oldest like first.
fn attach_likers(
    conn: &mut SqliteConnection,
    models: Vec<ProjectModel>,
) -> QueryResult<Vec<(ProjectModel, Vec<String>)>> {
    if models.is_empty() {
        return Ok(Vec::new());
    }

    let ids: Vec<String> = models.iter().map(|m| m.id.clone()).collect();
    let rows: Vec<(String, String)> = project_likes::table
        .filter(project_likes::project_id.eq_any(ids))
        .order((project_likes::liked_at.asc(), project_likes::user_id.asc()))
        .select((project_likes::project_id, project_likes::user_id))
        .load(conn)?;

    let mut likers: HashMap<String, Vec<String>> = HashMap::new();
    for (project_id, user_id) in rows {
        likers.entry(project_id).or_default().push(user_id);
    }

    Ok(models
        .into_iter()
        .map(|model| {
            let liked_by = likers.remove(&model.id).unwrap_or_default();
            (model, liked_by)
        })
        .collect())
}

fn load_project(
    conn: &mut SqliteConnection,
    project_id: &str,
) -> QueryResult<Option<(ProjectModel, Vec<String>)>> {
    let model = projects::table
        .filter(projects::id.eq(project_id))
        .select(ProjectModel::as_select())
        .first::<ProjectModel>(conn)
        .optional()?;

    match model {
        Some(model) => Ok(attach_likers(conn, vec![model])?.pop()),
        None => Ok(None),
    }
}

pub struct SqliteProjectRepository {
    pool: SqlitePool,
}

impl SqliteProjectRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProjectRepository for SqliteProjectRepository {
    async fn find_by_id(&self, id: &str) -> Result<Option<Project>, DomainError> {
        let id = id.to_string();
        let result = run_blocking(&self.pool, StoreOp::Read, move |conn| load_project(conn, &id)).await?;

        result
            .map(|(model, liked_by)| model.into_project(liked_by))
            .transpose()
    }

    async fn find_many(
        &self,
        query: &ProjectQuery,
        skip: u64,
        take: u64,
    ) -> Result<Vec<Project>, DomainError> {
        let query = query.clone();
        let offset = i64::try_from(skip).unwrap_or(i64::MAX);
        let limit = i64::try_from(take).unwrap_or(i64::MAX);

        let rows = run_blocking(&self.pool, StoreOp::Read, move |conn| {
            let models = filtered(&query)
                .order((projects::created_at.desc(), projects::seq.asc()))
                .offset(offset)
                .limit(limit)
                .select(ProjectModel::as_select())
                .load::<ProjectModel>(conn)?;
            attach_likers(conn, models)
        })
        .await?;

        rows.into_iter()
            .map(|(model, liked_by)| model.into_project(liked_by))
            .collect()
    }

    async fn count(&self, query: &ProjectQuery) -> Result<u64, DomainError> {
        let query = query.clone();
        let total = run_blocking(&self.pool, StoreOp::Read, move |conn| {
            filtered(&query).count().get_result::<i64>(conn)
        })
        .await?;

        Ok(total.max(0) as u64)
    }

    async fn save(&self, project: &Project) -> Result<Project, DomainError> {
        let new_project = NewProjectModel::from(project);
        let id = project.id.clone();

        let result = run_blocking(&self.pool, StoreOp::Write, move |conn| {
            diesel::insert_into(projects::table)
                .values(&new_project)
                .execute(conn)?;
            load_project(conn, &id)
        })
        .await?;

        let (model, liked_by) =
            result.ok_or_else(|| DomainError::WriteFailure("inserted project vanished".to_string()))?;
        model.into_project(liked_by)
    }

    async fn update(&self, project: &Project) -> Result<Project, DomainError> {
        let id = project.id.clone();
        let changes = NewProjectModel::from(project);

        let result = run_blocking(&self.pool, StoreOp::Write, move |conn| {
            let updated = diesel::update(projects::table.filter(projects::id.eq(&id)))
                .set((
                    projects::title.eq(changes.title),
                    projects::description.eq(changes.description),
                    projects::poster_image.eq(changes.poster_image),
                    projects::github_url.eq(changes.github_url),
                    projects::website_url.eq(changes.website_url),
                    projects::category.eq(changes.category),
                    projects::updated_at.eq(changes.updated_at),
                ))
                .execute(conn)?;

            if updated == 0 {
                return Ok(None);
            }
            load_project(conn, &id)
        })
        .await?;

        match result {
            Some((model, liked_by)) => model.into_project(liked_by),
            None => Err(DomainError::ProjectNotFound(project.id.clone())),
        }
    }

    async fn delete(&self, id: &str) -> Result<(), DomainError> {
        let id = id.to_string();
        run_blocking(&self.pool, StoreOp::Write, move |conn| {
            conn.immediate_transaction(|conn| {
                diesel::delete(project_likes::table.filter(project_likes::project_id.eq(&id)))
                    .execute(conn)?;
                diesel::delete(projects::table.filter(projects::id.eq(&id))).execute(conn)
            })
        })
        .await?;

        Ok(())
    }

    async fn toggle_like(
        &self,
        project_id: &str,
        user_id: &str,
    ) -> Result<Option<LikeStatus>, DomainError> {
        let project_id = project_id.to_string();
        let user_id = user_id.to_string();

        // IMMEDIATE takes the write lock up front, so the membership read and
        // both writes below cannot interleave with another toggle.
        run_blocking(&self.pool, StoreOp::Write, move |conn| {
            conn.immediate_transaction(|conn| {
                let likes = projects::table
                    .filter(projects::id.eq(&project_id))
                    .select(projects::likes)
                    .first::<i64>(conn)
                    .optional()?;
                let Some(likes) = likes else {
                    return Ok(None);
                };

                let already_liked = project_likes::table
                    .filter(project_likes::project_id.eq(&project_id))
                    .filter(project_likes::user_id.eq(&user_id))
                    .count()
                    .get_result::<i64>(conn)?
                    > 0;

                let next = if already_liked {
                    diesel::delete(
                        project_likes::table
                            .filter(project_likes::project_id.eq(&project_id))
                            .filter(project_likes::user_id.eq(&user_id)),
                    )
                    .execute(conn)?;
                    (likes - 1).max(0)
                } else {
                    diesel::insert_into(project_likes::table)
                        .values((
                            project_likes::project_id.eq(&project_id),
                            project_likes::user_id.eq(&user_id),
                            project_likes::liked_at.eq(chrono::Utc::now().naive_utc()),
                        ))
                        .execute(conn)?;
                    likes + 1
                };

                diesel::update(projects::table.filter(projects::id.eq(&project_id)))
                    .set(projects::likes.eq(next))
                    .execute(conn)?;

                Ok(Some(LikeStatus {
                    is_liked: !already_liked,
                    like_count: to_like_count(next),
                }))
            })
        })
        .await
    }
}
