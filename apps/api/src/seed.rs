//! Demo accounts, trade jobs and applications for an empty database.

use anyhow::{Context, Result};
use chrono::{DateTime, TimeZone, Utc};
use sqlx::types::Json;
use sqlx::SqlitePool;
use tracing::info;
use uuid::Uuid;

use crate::applications::repository::insert_application;
use crate::auth::password::hash_password_blocking;
use crate::auth::users::{count_users, insert_user};
use crate::jobs::repository::insert_job;
use crate::models::application::{ApplicationRow, ApplicationStatus};
use crate::models::job::{ExperienceRange, Job, JobType, SalaryRange};
use crate::models::profile::{Education, JobSeekerProfile, RecruiterProfile, WorkExperience};
use crate::models::user::{User, UserRole};
use crate::profiles::completeness::compute_profile_completeness;
use crate::profiles::repository::{save_jobseeker_profile, save_recruiter_profile};

pub const DEMO_SEEKER_EMAIL: &str = "mike.johnson@email.com";
pub const DEMO_RECRUITER_EMAIL: &str = "sarah.chen@builderscorp.com";

const AVATAR_BASE: &str = "https://api.dicebear.com/7.x/avataaars/svg?seed=";
const LOGO_BASE: &str = "https://api.dicebear.com/7.x/identicon/svg?seed=";

struct DemoSeeker {
    email: &'static str,
    name: &'static str,
    avatar_seed: &'static str,
    joined: (i32, u32, u32),
    title: &'static str,
    experience_years: i64,
    skills: &'static [&'static str],
    with_history: bool,
}

struct DemoJob {
    title: &'static str,
    company: &'static str,
    logo_seed: &'static str,
    location: &'static str,
    salary: (i64, i64),
    experience: (i64, i64),
    skills: &'static [&'static str],
    description: &'static str,
    responsibilities: &'static [&'static str],
    requirements: &'static [&'static str],
    benefits: &'static [&'static str],
    posted_day: u32,
    deadline: Option<(i32, u32, u32)>,
    applicants: i64,
    match_score: u32,
}

/// (seeker index, job index, status, score, January day)
const DEMO_APPLICATIONS: [(usize, usize, ApplicationStatus, i64, u32); 5] = [
    (0, 0, ApplicationStatus::Shortlisted, 94, 15),
    (0, 3, ApplicationStatus::Reviewed, 65, 14),
    (0, 1, ApplicationStatus::Pending, 72, 16),
    (1, 0, ApplicationStatus::Reviewed, 62, 16),
    (2, 0, ApplicationStatus::Pending, 98, 14),
];

const DEMO_SEEKERS: [DemoSeeker; 3] = [
    DemoSeeker {
        email: DEMO_SEEKER_EMAIL,
        name: "Mike Johnson",
        avatar_seed: "Mike",
        joined: (2024, 1, 15),
        title: "Licensed Electrician",
        experience_years: 8,
        skills: &[
            "Electrical Wiring",
            "Troubleshooting",
            "Blueprint Reading",
            "NEC Code",
            "Panel Installation",
            "Conduit Bending",
            "OSHA Certified",
        ],
        with_history: true,
    },
    DemoSeeker {
        email: "carlos.m@email.com",
        name: "Carlos Martinez",
        avatar_seed: "Carlos",
        joined: (2024, 1, 16),
        title: "Apprentice Electrician",
        experience_years: 2,
        skills: &[
            "Electrical Wiring",
            "Basic Troubleshooting",
            "Hand Tools",
            "Safety Procedures",
        ],
        with_history: false,
    },
    DemoSeeker {
        email: "david.w@email.com",
        name: "David Williams",
        avatar_seed: "David",
        joined: (2024, 1, 14),
        title: "Master Electrician",
        experience_years: 15,
        skills: &[
            "Electrical Wiring",
            "Troubleshooting",
            "Blueprint Reading",
            "NEC Code",
            "OSHA Certified",
            "Project Management",
            "Team Leadership",
        ],
        with_history: true,
    },
];

const DEMO_JOBS: [DemoJob; 6] = [
    DemoJob {
        title: "Licensed Electrician",
        company: "PowerMax Electric",
        logo_seed: "PowerMax",
        location: "Houston, TX",
        salary: (55_000, 75_000),
        experience: (3, 7),
        skills: &[
            "Electrical Wiring",
            "Troubleshooting",
            "Blueprint Reading",
            "NEC Code",
            "OSHA Certified",
        ],
        description: "We are looking for a Licensed Electrician to join our team. You will install, maintain, and repair electrical systems in residential and commercial buildings.",
        responsibilities: &[
            "Install and maintain electrical wiring and systems",
            "Read and interpret blueprints and electrical diagrams",
            "Troubleshoot and repair electrical issues",
            "Ensure compliance with NEC and local codes",
            "Train and supervise apprentice electricians",
        ],
        requirements: &[
            "Valid Journeyman or Master Electrician license",
            "3+ years of commercial electrical experience",
            "Strong knowledge of NEC codes",
            "Ability to read blueprints",
            "Valid driver's license and reliable transportation",
        ],
        benefits: &[
            "Competitive hourly rate + overtime",
            "Health insurance",
            "Company vehicle provided",
            "401(k) with company match",
            "Paid training and certifications",
        ],
        posted_day: 10,
        deadline: Some((2024, 2, 28)),
        applicants: 23,
        match_score: 94,
    },
    DemoJob {
        title: "Plumber",
        company: "FlowRight Plumbing",
        logo_seed: "FlowRight",
        location: "Dallas, TX",
        salary: (48_000, 68_000),
        experience: (2, 5),
        skills: &[
            "Pipe Fitting",
            "Drain Cleaning",
            "Water Heater Installation",
            "Leak Detection",
            "Customer Service",
        ],
        description: "Join our team as a skilled Plumber to provide quality plumbing services to residential and commercial customers.",
        responsibilities: &[
            "Install, repair, and maintain plumbing systems",
            "Diagnose plumbing issues and provide solutions",
            "Install water heaters and fixtures",
            "Clear drain blockages",
            "Provide excellent customer service",
        ],
        requirements: &[
            "Valid Plumbing License",
            "2+ years of plumbing experience",
            "Knowledge of local plumbing codes",
            "Strong problem-solving skills",
            "Valid driver's license",
        ],
        benefits: &[
            "Competitive pay",
            "Health and dental insurance",
            "Company truck",
            "Tool allowance",
            "Paid holidays",
        ],
        posted_day: 12,
        deadline: None,
        applicants: 31,
        match_score: 72,
    },
    DemoJob {
        title: "Welder/Fabricator",
        company: "SteelWorks Industries",
        logo_seed: "SteelWorks",
        location: "Phoenix, AZ",
        salary: (50_000, 72_000),
        experience: (3, 8),
        skills: &[
            "MIG Welding",
            "TIG Welding",
            "Blueprint Reading",
            "Metal Fabrication",
            "AWS Certified",
        ],
        description: "Looking for an experienced Welder/Fabricator to join our metal fabrication shop.",
        responsibilities: &[
            "Perform MIG and TIG welding operations",
            "Read and interpret blueprints and work orders",
            "Fabricate metal components to specifications",
            "Inspect welds for quality and defects",
            "Maintain welding equipment",
        ],
        requirements: &[
            "AWS certification preferred",
            "3+ years welding experience",
            "Proficiency in MIG and TIG welding",
            "Ability to read blueprints",
            "Strong attention to detail",
        ],
        benefits: &[
            "Competitive wages",
            "Full benefits package",
            "Overtime available",
            "Climate-controlled shop",
            "Safety gear provided",
        ],
        posted_day: 14,
        deadline: None,
        applicants: 18,
        match_score: 68,
    },
    DemoJob {
        title: "HVAC Technician",
        company: "CoolAir Services",
        logo_seed: "CoolAir",
        location: "Austin, TX",
        salary: (52_000, 78_000),
        experience: (2, 6),
        skills: &[
            "HVAC Installation",
            "Refrigerant Handling",
            "EPA Certified",
            "Electrical Troubleshooting",
            "Customer Service",
        ],
        description: "Join our HVAC team to install and service heating and cooling systems.",
        responsibilities: &[
            "Install and repair HVAC systems",
            "Perform preventative maintenance",
            "Troubleshoot system issues",
            "Handle refrigerants safely",
            "Provide excellent customer service",
        ],
        requirements: &[
            "EPA 608 certification",
            "2+ years HVAC experience",
            "Valid driver's license",
            "Ability to work in various weather conditions",
            "Strong customer service skills",
        ],
        benefits: &[
            "Competitive salary + bonuses",
            "Health insurance",
            "Company van",
            "Paid training",
            "Tool allowance",
        ],
        posted_day: 8,
        deadline: None,
        applicants: 27,
        match_score: 65,
    },
    DemoJob {
        title: "Construction Carpenter",
        company: "BuildRight Construction",
        logo_seed: "BuildRight",
        location: "San Antonio, TX",
        salary: (45_000, 62_000),
        experience: (2, 5),
        skills: &[
            "Framing",
            "Finish Carpentry",
            "Blueprint Reading",
            "Power Tools",
            "Safety Procedures",
        ],
        description: "Seeking skilled Carpenter for residential and commercial construction projects.",
        responsibilities: &[
            "Build and install frameworks and structures",
            "Read and follow blueprints",
            "Measure, cut, and shape wood and materials",
            "Install doors, windows, and trim",
            "Follow safety protocols",
        ],
        requirements: &[
            "2+ years carpentry experience",
            "Own basic hand tools",
            "Ability to read blueprints",
            "Physical ability to lift 50+ lbs",
            "Valid driver's license",
        ],
        benefits: &[
            "Competitive pay",
            "Health benefits",
            "Steady work year-round",
            "Advancement opportunities",
            "Safety bonuses",
        ],
        posted_day: 11,
        deadline: None,
        applicants: 42,
        match_score: 58,
    },
    DemoJob {
        title: "Heavy Equipment Operator",
        company: "EarthMovers LLC",
        logo_seed: "EarthMovers",
        location: "Denver, CO",
        salary: (55_000, 80_000),
        experience: (3, 8),
        skills: &[
            "Excavator Operation",
            "Bulldozer",
            "Loader",
            "GPS Grade Control",
            "Safety Compliance",
        ],
        description: "Experienced Heavy Equipment Operator needed for large construction projects.",
        responsibilities: &[
            "Operate excavators, bulldozers, and loaders",
            "Perform equipment inspections",
            "Follow grade stakes and GPS systems",
            "Maintain safe work environment",
            "Complete daily equipment logs",
        ],
        requirements: &[
            "3+ years equipment operation experience",
            "CDL preferred",
            "OSHA 10 or 30 certification",
            "Experience with GPS grade control",
            "Strong safety record",
        ],
        benefits: &[
            "Top pay in the industry",
            "Full benefits",
            "Per diem for travel",
            "Modern equipment",
            "Year-round work",
        ],
        posted_day: 9,
        deadline: None,
        applicants: 15,
        match_score: 45,
    },
];

/// Seeds the demo data set when the database has no users.
/// Returns whether anything was written.
pub async fn seed_demo_data(pool: &SqlitePool, demo_password: &str) -> Result<bool> {
    if count_users(pool).await? > 0 {
        info!("Users already present, skipping demo seed");
        return Ok(false);
    }

    let password_hash = hash_password_blocking(demo_password.to_string()).await?;

    let mut seekers = Vec::with_capacity(DEMO_SEEKERS.len());
    for demo in &DEMO_SEEKERS {
        seekers.push(seeker_records(demo, &password_hash)?);
    }

    let recruiter = User {
        id: Uuid::new_v4(),
        email: DEMO_RECRUITER_EMAIL.to_string(),
        password_hash: password_hash.clone(),
        name: "Sarah Chen".to_string(),
        role: UserRole::Recruiter,
        avatar: Some(format!("{AVATAR_BASE}Sarah")),
        created_at: date(2023, 6, 1)?,
    };
    let recruiter_profile = RecruiterProfile {
        user_id: recruiter.id,
        company: "Builders Corp".to_string(),
        company_logo: Some(format!("{LOGO_BASE}BuildersCorp")),
        position: "Hiring Manager".to_string(),
        jobs_posted: DEMO_JOBS.len() as i64,
    };

    let mut jobs = Vec::with_capacity(DEMO_JOBS.len());
    for demo in &DEMO_JOBS {
        jobs.push(job_record(demo, recruiter.id)?);
    }

    let mut applications = Vec::with_capacity(DEMO_APPLICATIONS.len());
    for (seeker, job, status, score, day) in DEMO_APPLICATIONS {
        applications.push(ApplicationRow {
            id: Uuid::new_v4(),
            job_id: jobs[job].id,
            user_id: seekers[seeker].0.id,
            status,
            applied_at: date(2024, 1, day)?,
            cover_letter: None,
            match_score: score,
        });
    }

    let mut tx = pool.begin().await?;
    for (user, profile) in &seekers {
        insert_user(&mut *tx, user).await?;
        save_jobseeker_profile(&mut *tx, profile).await?;
    }
    insert_user(&mut *tx, &recruiter).await?;
    save_recruiter_profile(&mut *tx, &recruiter_profile).await?;
    for job in &jobs {
        insert_job(&mut *tx, job).await?;
    }
    for application in &applications {
        insert_application(&mut *tx, application).await?;
    }
    tx.commit().await?;

    info!(
        "Seeded demo data: {} users, {} jobs, {} applications",
        seekers.len() + 1,
        jobs.len(),
        applications.len()
    );
    Ok(true)
}

fn seeker_records(demo: &DemoSeeker, password_hash: &str) -> Result<(User, JobSeekerProfile)> {
    let (y, m, d) = demo.joined;
    let user = User {
        id: Uuid::new_v4(),
        email: demo.email.to_string(),
        password_hash: password_hash.to_string(),
        name: demo.name.to_string(),
        role: UserRole::Jobseeker,
        avatar: Some(format!("{AVATAR_BASE}{}", demo.avatar_seed)),
        created_at: date(y, m, d)?,
    };

    let mut profile = JobSeekerProfile::empty(user.id);
    profile.title = Some(demo.title.to_string());
    profile.location = Some("Houston, TX".to_string());
    profile.experience_years = Some(demo.experience_years);
    profile.skills = Json(demo.skills.iter().map(|s| s.to_string()).collect());
    if demo.with_history {
        profile.bio = Some(format!(
            "Licensed electrician with {}+ years of experience in residential and commercial electrical work.",
            demo.experience_years
        ));
        profile.education = Json(vec![Education {
            id: "edu-1".to_string(),
            institution: "Houston Community College".to_string(),
            degree: "Certificate".to_string(),
            field: "Electrical Technology".to_string(),
            start_year: 2014,
            end_year: Some(2016),
        }]);
        profile.work_history = Json(vec![
            WorkExperience {
                id: "work-1".to_string(),
                company: "PowerMax Electric".to_string(),
                position: "Lead Electrician".to_string(),
                location: "Houston, TX".to_string(),
                start_date: "2020-03".to_string(),
                end_date: None,
                current: true,
                description: "Leading electrical installations for commercial projects up to $2M."
                    .to_string(),
            },
            WorkExperience {
                id: "work-2".to_string(),
                company: "City Electric Co.".to_string(),
                position: "Journeyman Electrician".to_string(),
                location: "Houston, TX".to_string(),
                start_date: "2016-06".to_string(),
                end_date: Some("2020-02".to_string()),
                current: false,
                description: "Performed residential and light commercial electrical work."
                    .to_string(),
            },
        ]);
    }
    profile.profile_completeness = i64::from(compute_profile_completeness(&user.name, &profile));
    Ok((user, profile))
}

fn job_record(demo: &DemoJob, recruiter_id: Uuid) -> Result<Job> {
    let owned = |items: &[&str]| items.iter().map(|s| s.to_string()).collect::<Vec<_>>();
    Ok(Job {
        id: Uuid::new_v4(),
        title: demo.title.to_string(),
        company: demo.company.to_string(),
        company_logo: Some(format!("{LOGO_BASE}{}", demo.logo_seed)),
        location: demo.location.to_string(),
        job_type: JobType::FullTime,
        salary: SalaryRange {
            min: demo.salary.0,
            max: demo.salary.1,
            currency: "USD".to_string(),
        },
        experience: ExperienceRange {
            min: demo.experience.0,
            max: demo.experience.1,
        },
        skills: owned(demo.skills),
        description: demo.description.to_string(),
        responsibilities: owned(demo.responsibilities),
        requirements: owned(demo.requirements),
        benefits: owned(demo.benefits),
        posted_at: date(2024, 1, demo.posted_day)?,
        deadline: demo.deadline.map(|(y, m, d)| date(y, m, d)).transpose()?,
        recruiter_id,
        applicants: demo.applicants,
        match_score: Some(demo.match_score),
    })
}

fn date(year: i32, month: u32, day: u32) -> Result<DateTime<Utc>> {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0)
        .single()
        .with_context(|| format!("invalid demo date {year}-{month:02}-{day:02}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::applications::repository::list_for_user;
    use crate::auth::password::verify_password;
    use crate::auth::users::find_by_email;
    use crate::db::create_pool;
    use crate::jobs::repository::list_jobs;
    use crate::profiles::repository::get_jobseeker_profile;

    #[tokio::test]
    async fn test_seed_populates_empty_database_once() {
        let pool = create_pool("sqlite::memory:").await.unwrap();

        assert!(seed_demo_data(&pool, "bluecolab-demo").await.unwrap());
        assert_eq!(count_users(&pool).await.unwrap(), 4);

        let jobs = list_jobs(&pool).await.unwrap();
        assert_eq!(jobs.len(), 6);
        // Newest first: Welder/Fabricator was posted Jan 14.
        assert_eq!(jobs[0].title, "Welder/Fabricator");
        assert_eq!(jobs[0].match_score, Some(68));

        // Second run is a no-op.
        assert!(!seed_demo_data(&pool, "bluecolab-demo").await.unwrap());
        assert_eq!(count_users(&pool).await.unwrap(), 4);
    }

    #[tokio::test]
    async fn test_demo_seeker_can_log_in_and_has_history() {
        let pool = create_pool("sqlite::memory:").await.unwrap();
        seed_demo_data(&pool, "hunter22").await.unwrap();

        let mike = find_by_email(&pool, DEMO_SEEKER_EMAIL).await.unwrap().unwrap();
        assert!(verify_password("hunter22", &mike.password_hash));

        let profile = get_jobseeker_profile(&pool, mike.id).await.unwrap().unwrap();
        assert_eq!(profile.profile_completeness, 100);
        assert_eq!(profile.current_position(), Some("Lead Electrician"));

        let applications = list_for_user(&pool, mike.id).await.unwrap();
        assert_eq!(applications.len(), 3);
    }

    #[test]
    fn test_demo_dates_are_valid() {
        for job in &DEMO_JOBS {
            assert!(job_record(job, Uuid::new_v4()).is_ok());
        }
    }

    #[test]
    fn test_demo_deadline_is_end_of_february() {
        let electrician = job_record(&DEMO_JOBS[0], Uuid::new_v4()).unwrap();
        assert_eq!(
            electrician.deadline.unwrap().date_naive(),
            chrono::NaiveDate::from_ymd_opt(2024, 2, 28).unwrap()
        );
    }
}
