use crate::db::models::{NewStudent, Student, StudentChange};
use crate::errors::Error;
use diesel::prelude::*;
use diesel::result::Error as DieselError;
use diesel::sqlite::SqliteConnection;

diesel::define_sql_function! {
    /// SQLite `lower()`, used for case-insensitive name matching
    fn lower(x: diesel::sql_types::Text) -> diesel::sql_types::Text;
}

/// Repository for managing student records in the SQLite database
///
/// Every write runs in its own transaction, so a sequence of writes through
/// the same repository commits each step independently.
pub struct StudentRepository<'a> {
    /// Database connection
    pub conn: &'a mut SqliteConnection,
}

impl<'a> StudentRepository<'a> {
    /// Creates a new StudentRepository instance
    ///
    /// # Arguments
    ///
    /// * `conn` - Mutable reference to SQLite database connection
    pub fn new(conn: &'a mut SqliteConnection) -> Self {
        StudentRepository { conn }
    }

    /// Inserts a new student and returns the id the store assigned to it
    ///
    /// # Errors
    ///
    /// Returns an Error if the insert violates a constraint or the store fails
    pub fn insert_student(&mut self, new_student: &NewStudent) -> Result<i32, Error> {
        use crate::schema::students::dsl::*;

        let new_id = self.conn.transaction::<_, DieselError, _>(|conn| {
            diesel::insert_into(students)
                .values(new_student)
                .execute(conn)?;
            students.select(id).order(id.desc()).first::<i32>(conn)
        })?;

        Ok(new_id)
    }

    /// Retrieves every student ordered by id
    pub fn get_students(&mut self) -> Result<Vec<Student>, Error> {
        use crate::schema::students::dsl::*;

        let found = students
            .order(id.asc())
            .select(Student::as_select())
            .load(self.conn)?;
        Ok(found)
    }

    /// Retrieves at most `take` students ordered by id, after skipping `skip`
    pub fn get_students_page(&mut self, skip: i64, take: i64) -> Result<Vec<Student>, Error> {
        use crate::schema::students::dsl::*;

        let found = students
            .order(id.asc())
            .offset(skip)
            .limit(take)
            .select(Student::as_select())
            .load(self.conn)?;
        Ok(found)
    }

    /// Retrieves the students whose first name equals `name`, ignoring case
    pub fn get_students_by_first_name(&mut self, name: &str) -> Result<Vec<Student>, Error> {
        use crate::schema::students::dsl::*;

        let found = students
            .filter(lower(first_name).eq(name.to_lowercase()))
            .order(id.asc())
            .select(Student::as_select())
            .load(self.conn)?;
        Ok(found)
    }

    /// Retrieves a single student by primary key
    pub fn get_student_by_id(&mut self, student_id: i32) -> Result<Option<Student>, Error> {
        use crate::schema::students::dsl::*;

        let found = students
            .find(student_id)
            .select(Student::as_select())
            .first(self.conn)
            .optional()?;
        Ok(found)
    }

    /// Writes one column of an existing student and commits it
    ///
    /// # Returns
    ///
    /// The number of rows touched, zero when the student does not exist
    pub fn update_student_field(
        &mut self,
        student_id: i32,
        change: &StudentChange,
    ) -> Result<usize, Error> {
        use crate::schema::students::dsl::*;

        let target = students.find(student_id);
        let affected = self
            .conn
            .transaction::<_, DieselError, _>(|conn| match change {
                StudentChange::FirstName(value) => diesel::update(target)
                    .set(first_name.eq(value))
                    .execute(conn),
                StudentChange::LastName(value) => diesel::update(target)
                    .set(last_name.eq(value))
                    .execute(conn),
                StudentChange::Email(value) => diesel::update(target)
                    .set(email.eq(value))
                    .execute(conn),
                StudentChange::Gender(value) => diesel::update(target)
                    .set(gender.eq(value.as_str()))
                    .execute(conn),
            })?;

        Ok(affected)
    }

    /// Deletes a student by primary key
    ///
    /// # Returns
    ///
    /// The number of rows removed, zero when the student does not exist
    pub fn delete_student_by_id(&mut self, student_id: i32) -> Result<usize, Error> {
        use crate::schema::students::dsl::*;

        let removed = self.conn.transaction::<_, DieselError, _>(|conn| {
            diesel::delete(students.find(student_id)).execute(conn)
        })?;
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::db::models::Gender;
    use crate::db::Database;
    use tempfile::TempDir;

    fn test_database() -> (TempDir, Database) {
        let temp_dir = TempDir::new().unwrap();
        let config = AppConfig {
            database_path: temp_dir.path().join("students.db").display().to_string(),
            pool_size: 2,
            ..AppConfig::default()
        };
        let database = Database::new(&config).unwrap();
        database.init_schema().unwrap();
        (temp_dir, database)
    }

    fn new_student(first: &str) -> NewStudent {
        NewStudent {
            first_name: first.to_string(),
            last_name: "Smith".to_string(),
            email: Some(format!("{}@school.com", first.to_lowercase())),
            gender: Gender::Female.to_string(),
        }
    }

    #[test]
    fn test_insert_assigns_increasing_ids() {
        let (_dir, database) = test_database();
        let mut conn = database.get_conn().unwrap();
        let mut repo = StudentRepository::new(&mut conn);

        let first = repo.insert_student(&new_student("Ana")).unwrap();
        let second = repo.insert_student(&new_student("Bob")).unwrap();
        assert!(second > first);

        let stored = repo.get_student_by_id(first).unwrap().unwrap();
        assert_eq!(stored.first_name, "Ana");
        assert_eq!(stored.email.as_deref(), Some("ana@school.com"));
        assert_eq!(stored.gender, "female");
    }

    #[test]
    fn test_ids_are_not_reused_after_delete() {
        let (_dir, database) = test_database();
        let mut conn = database.get_conn().unwrap();
        let mut repo = StudentRepository::new(&mut conn);

        let first = repo.insert_student(&new_student("Ana")).unwrap();
        assert_eq!(repo.delete_student_by_id(first).unwrap(), 1);
        let second = repo.insert_student(&new_student("Ana")).unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_page_and_name_filter() {
        let (_dir, database) = test_database();
        let mut conn = database.get_conn().unwrap();
        let mut repo = StudentRepository::new(&mut conn);

        for name in ["Ana", "Bob", "ANA", "Cleo"] {
            repo.insert_student(&new_student(name)).unwrap();
        }

        let page: Vec<String> = repo
            .get_students_page(1, 2)
            .unwrap()
            .into_iter()
            .map(|s| s.first_name)
            .collect();
        assert_eq!(page, vec!["Bob", "ANA"]);
        assert!(repo.get_students_page(10, 5).unwrap().is_empty());

        let anas = repo.get_students_by_first_name("ana").unwrap();
        assert_eq!(anas.len(), 2);
        assert!(repo.get_students_by_first_name("zed").unwrap().is_empty());
    }

    #[test]
    fn test_update_field_and_missing_row() {
        let (_dir, database) = test_database();
        let mut conn = database.get_conn().unwrap();
        let mut repo = StudentRepository::new(&mut conn);

        let student_id = repo.insert_student(&new_student("Ana")).unwrap();
        let change = StudentChange::Gender(Gender::Male);
        assert_eq!(repo.update_student_field(student_id, &change).unwrap(), 1);
        assert_eq!(
            repo.get_student_by_id(student_id).unwrap().unwrap().gender,
            "male"
        );

        let change = StudentChange::LastName("Jones".into());
        assert_eq!(repo.update_student_field(student_id + 100, &change).unwrap(), 0);
        assert_eq!(repo.delete_student_by_id(student_id + 100).unwrap(), 0);
    }
}
