use chrono::Local;
use diesel::prelude::*;
use pushkind_common::repository::errors::RepositoryResult;

use crate::{
    domain::user::{NewUser as DomainNewUser, User as DomainUser},
    models::user::{NewUser as DbNewUser, User as DbUser},
    repository::{DieselRepository, UserReader, UserWriter},
};

impl UserReader for DieselRepository {
    fn get_user_by_email(&self, email: &str, hub_id: i32) -> RepositoryResult<Option<DomainUser>> {
        use crate::schema::users;

        let mut conn = self.conn()?;
        let user = users::table
            .filter(users::email.eq(email.to_lowercase()))
            .filter(users::hub_id.eq(hub_id))
            .first::<DbUser>(&mut conn)
            .optional()?;

        Ok(user.map(Into::into))
    }
}

impl UserWriter for DieselRepository {
    fn upsert_user(&self, new_user: &DomainNewUser) -> RepositoryResult<DomainUser> {
        use crate::schema::users;

        let mut conn = self.conn()?;
        let db_new = DbNewUser::from(new_user);

        let user = diesel::insert_into(users::table)
            .values(&db_new)
            .on_conflict((users::hub_id, users::email))
            .do_update()
            .set((
                users::name.eq(db_new.name),
                users::updated_at.eq(Local::now().naive_utc()),
            ))
            .get_result::<DbUser>(&mut conn)?;

        Ok(user.into())
    }
}
